//! Declaration-level symbol table.
//!
//! Symbols are plain ids into the table, so equality of two symbols is
//! equality of their ids: the same declaration always yields the same id no
//! matter how it was referenced (`Response`, `this.Response`, ...).

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tree_sitter::Node;

use crate::host::SymbolKind;
use crate::parsers::FileId;

/// Bound on base-type hops during member lookup; guards against cycles in
/// malformed sources.
const MAX_BASE_DEPTH: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberId(pub u32);

/// Byte span of a declaration node within one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclSite {
    pub file: FileId,
    pub start_byte: usize,
    pub end_byte: usize,
}

impl DeclSite {
    pub fn of(file: FileId, node: Node<'_>) -> Self {
        Self {
            file,
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Record,
    Enum,
    Delegate,
}

impl TypeKind {
    pub fn from_node_kind(kind: &str) -> Option<Self> {
        match kind {
            "class_declaration" => Some(Self::Class),
            "struct_declaration" => Some(Self::Struct),
            "interface_declaration" => Some(Self::Interface),
            "record_declaration" | "record_struct_declaration" => Some(Self::Record),
            "enum_declaration" => Some(Self::Enum),
            "delegate_declaration" => Some(Self::Delegate),
            _ => None,
        }
    }
}

/// A named type. Partial declarations share one `TypeSymbol`.
#[derive(Debug, Clone)]
pub struct TypeSymbol {
    pub name: String,
    pub qualified_name: String,
    pub namespace: String,
    pub kind: TypeKind,
    pub outer: Option<TypeId>,
    /// One entry per declaration; more than one only for partial types.
    pub declarations: SmallVec<[DeclSite; 1]>,
    /// Resolved base class and interfaces declared in source.
    pub bases: Vec<TypeId>,
    pub members: FxHashMap<String, SmallVec<[MemberId; 2]>>,
    pub nested: FxHashMap<String, TypeId>,
    /// Base-list entries as written, with the declaration they came from.
    pub(crate) base_names: Vec<(String, DeclSite)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Event,
    Method,
    Field,
    Property,
    /// Constructors, destructors, operators.
    Other,
}

impl From<MemberKind> for SymbolKind {
    fn from(kind: MemberKind) -> Self {
        match kind {
            MemberKind::Event => SymbolKind::Event,
            MemberKind::Method => SymbolKind::Method,
            MemberKind::Field => SymbolKind::Field,
            MemberKind::Property => SymbolKind::Property,
            MemberKind::Other => SymbolKind::Other,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MemberSymbol {
    pub name: String,
    pub kind: MemberKind,
    pub containing_type: TypeId,
    /// Declared type as written (`EventHandler`, `Publisher`); the return
    /// type for methods.
    pub declared_type: Option<String>,
    pub decl: DeclSite,
}

/// Resolved identity of a named entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Type(TypeId),
    Member(MemberId),
    /// Local variable or parameter, identified by its declarator.
    Local(DeclSite),
    LocalFunction(DeclSite),
    /// Lambda or anonymous method; every lambda expression is distinct.
    Lambda(DeclSite),
}

#[derive(Debug, Default)]
pub struct SymbolTable {
    types: Vec<TypeSymbol>,
    members: Vec<MemberSymbol>,
    types_by_qualified: FxHashMap<String, TypeId>,
    types_by_simple: FxHashMap<String, SmallVec<[TypeId; 2]>>,
    type_decls: FxHashMap<(FileId, usize), TypeId>,
    member_decls: FxHashMap<(FileId, usize), MemberId>,
}

impl SymbolTable {
    pub fn type_symbol(&self, id: TypeId) -> Option<&TypeSymbol> {
        self.types.get(id.0 as usize)
    }

    pub fn member(&self, id: MemberId) -> Option<&MemberSymbol> {
        self.members.get(id.0 as usize)
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn type_by_qualified_name(&self, qualified_name: &str) -> Option<TypeId> {
        self.types_by_qualified.get(qualified_name).copied()
    }

    /// Every type with the given simple name, in declaration order.
    pub fn types_named(&self, name: &str) -> &[TypeId] {
        self.types_by_simple.get(name).map_or(&[], |ids| ids.as_slice())
    }

    /// The type whose declaration node starts at `start_byte` in `file`.
    pub fn type_declared_at(&self, file: FileId, start_byte: usize) -> Option<TypeId> {
        self.type_decls.get(&(file, start_byte)).copied()
    }

    /// The member whose declaration (or field declarator) starts at `start_byte`.
    pub fn member_declared_at(&self, file: FileId, start_byte: usize) -> Option<MemberId> {
        self.member_decls.get(&(file, start_byte)).copied()
    }

    pub fn kind_of(&self, symbol: &Symbol) -> SymbolKind {
        match symbol {
            Symbol::Type(_) => SymbolKind::Type,
            Symbol::Member(id) => self.member(*id).map_or(SymbolKind::Other, |m| m.kind.into()),
            Symbol::Local(_) => SymbolKind::Local,
            Symbol::LocalFunction(_) | Symbol::Lambda(_) => SymbolKind::Method,
        }
    }

    /// Find `name` among the members of `ty` or, failing that, its bases.
    pub fn lookup_member(&self, ty: TypeId, name: &str) -> Option<MemberId> {
        self.lookup_member_at_depth(ty, name, 0)
    }

    fn lookup_member_at_depth(&self, ty: TypeId, name: &str, depth: usize) -> Option<MemberId> {
        if depth > MAX_BASE_DEPTH {
            return None;
        }
        let symbol = self.type_symbol(ty)?;
        if let Some(ids) = symbol.members.get(name) {
            return ids.first().copied();
        }
        symbol
            .bases
            .iter()
            .find_map(|&base| self.lookup_member_at_depth(base, name, depth + 1))
    }

    /// Nested type `name` of `ty`.
    pub fn nested_type(&self, ty: TypeId, name: &str) -> Option<TypeId> {
        self.type_symbol(ty)?.nested.get(name).copied()
    }

    /// Register a declaration of a type, merging partial declarations that
    /// share a qualified name.
    pub(crate) fn declare_type(
        &mut self,
        name: &str,
        qualified_name: String,
        namespace: &str,
        kind: TypeKind,
        outer: Option<TypeId>,
        site: DeclSite,
    ) -> TypeId {
        let id = match self.types_by_qualified.get(&qualified_name) {
            Some(&existing) => existing,
            None => {
                let id = TypeId(self.types.len() as u32);
                self.types.push(TypeSymbol {
                    name: name.to_string(),
                    qualified_name: qualified_name.clone(),
                    namespace: namespace.to_string(),
                    kind,
                    outer,
                    declarations: SmallVec::new(),
                    bases: Vec::new(),
                    members: FxHashMap::default(),
                    nested: FxHashMap::default(),
                    base_names: Vec::new(),
                });
                self.types_by_qualified.insert(qualified_name, id);
                self.types_by_simple.entry(name.to_string()).or_default().push(id);
                if let Some(outer) = outer.and_then(|o| self.types.get_mut(o.0 as usize)) {
                    outer.nested.insert(name.to_string(), id);
                }
                id
            }
        };
        if let Some(symbol) = self.types.get_mut(id.0 as usize) {
            symbol.declarations.push(site);
        }
        self.type_decls.insert((site.file, site.start_byte), id);
        id
    }

    pub(crate) fn add_base_name(&mut self, ty: TypeId, name: String, site: DeclSite) {
        if let Some(symbol) = self.types.get_mut(ty.0 as usize) {
            symbol.base_names.push((name, site));
        }
    }

    pub(crate) fn set_bases(&mut self, ty: TypeId, bases: Vec<TypeId>) {
        if let Some(symbol) = self.types.get_mut(ty.0 as usize) {
            symbol.bases = bases;
        }
    }

    pub(crate) fn add_member(
        &mut self,
        name: &str,
        kind: MemberKind,
        containing_type: TypeId,
        declared_type: Option<String>,
        decl: DeclSite,
    ) -> MemberId {
        let id = MemberId(self.members.len() as u32);
        self.members.push(MemberSymbol {
            name: name.to_string(),
            kind,
            containing_type,
            declared_type,
            decl,
        });
        if let Some(owner) = self.types.get_mut(containing_type.0 as usize) {
            owner.members.entry(name.to_string()).or_default().push(id);
        }
        self.member_decls.insert((decl.file, decl.start_byte), id);
        id
    }

    pub(crate) fn type_ids(&self) -> impl Iterator<Item = TypeId> {
        (0..self.types.len() as u32).map(TypeId)
    }
}
