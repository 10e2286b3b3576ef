//! A set of parsed files plus the symbol table built over all of them.

use lapse_core::errors::ParseError;
use tree_sitter::Node;

use super::declarations::{self, FileScope};
use super::symbols::{DeclSite, SymbolTable, TypeId};
use super::syntax::{join_name, normalize_type_name};
use crate::parsers::{CSharpParser, FileId, SourceFile};

/// Where a type name is being resolved from.
#[derive(Debug, Clone)]
pub struct TypeScope {
    pub file: FileId,
    pub namespace: String,
    /// Innermost type whose body contains the reference.
    pub enclosing: Option<TypeId>,
}

/// Immutable after construction; share it across threads by reference.
#[derive(Debug)]
pub struct Compilation {
    files: Vec<SourceFile>,
    scopes: Vec<FileScope>,
    symbols: SymbolTable,
}

impl Compilation {
    pub fn new(files: Vec<SourceFile>) -> Self {
        let mut symbols = SymbolTable::default();
        let scopes = files
            .iter()
            .enumerate()
            .map(|(i, file)| declarations::collect(&mut symbols, FileId(i as u32), file))
            .collect();
        let mut compilation = Self {
            files,
            scopes,
            symbols,
        };
        compilation.link_bases();
        tracing::debug!(
            files = compilation.files.len(),
            types = compilation.symbols.type_count(),
            members = compilation.symbols.member_count(),
            "compilation built"
        );
        compilation
    }

    /// Parse `(path, text)` pairs and build a compilation from them.
    pub fn from_sources<P: AsRef<str>, S: AsRef<str>>(sources: &[(P, S)]) -> Result<Self, ParseError> {
        let parser = CSharpParser::new();
        let files = sources
            .iter()
            .map(|(path, text)| parser.parse(text.as_ref(), path.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(files))
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.index())
    }

    pub fn file_ids(&self) -> impl Iterator<Item = FileId> {
        (0..self.files.len() as u32).map(FileId)
    }

    pub fn file_id(&self, path: &str) -> Option<FileId> {
        self.files
            .iter()
            .position(|f| f.path == path)
            .map(|i| FileId(i as u32))
    }

    pub fn scope(&self, id: FileId) -> Option<&FileScope> {
        self.scopes.get(id.index())
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// The outermost node spanning exactly `site`.
    pub fn node_at(&self, site: DeclSite) -> Option<Node<'_>> {
        let root = self.file(site.file)?.root();
        let mut node = root.descendant_for_byte_range(site.start_byte, site.end_byte)?;
        while let Some(parent) = node.parent() {
            if parent.start_byte() != site.start_byte || parent.end_byte() != site.end_byte {
                break;
            }
            node = parent;
        }
        (node.start_byte() == site.start_byte && node.end_byte() == site.end_byte).then_some(node)
    }

    /// Resolve a type name as written in `scope`.
    ///
    /// Lookup order: using aliases, types nested in the enclosing types,
    /// the enclosing namespaces from innermost outward, `using` imports,
    /// and finally a simple name that is unique in the compilation.
    pub fn resolve_type_name(&self, scope: &TypeScope, written: &str) -> Option<TypeId> {
        let name = normalize_type_name(written);
        if name.is_empty() {
            return None;
        }
        let (head, tail) = match name.split_once('.') {
            Some((head, tail)) => (head, Some(tail)),
            None => (name.as_str(), None),
        };
        let file_scope = self.scope(scope.file);

        if let Some(target) = file_scope.and_then(|s| s.aliases.get(head)) {
            let full = match tail {
                Some(tail) => format!("{target}.{tail}"),
                None => target.clone(),
            };
            if let Some(id) = self.symbols.type_by_qualified_name(&full) {
                return Some(id);
            }
        }

        let mut enclosing = scope.enclosing;
        while let Some(ty) = enclosing {
            if let Some(id) = self.nested_path(ty, &name) {
                return Some(id);
            }
            enclosing = self.symbols.type_symbol(ty).and_then(|t| t.outer);
        }

        let mut namespace = scope.namespace.as_str();
        loop {
            if let Some(id) = self.symbols.type_by_qualified_name(&join_name(namespace, &name)) {
                return Some(id);
            }
            if namespace.is_empty() {
                break;
            }
            namespace = namespace.rsplit_once('.').map_or("", |(parent, _)| parent);
        }

        if let Some(file_scope) = file_scope {
            for using in &file_scope.usings {
                if let Some(id) = self.symbols.type_by_qualified_name(&join_name(using, &name)) {
                    return Some(id);
                }
            }
        }

        if tail.is_none() {
            if let [only] = self.symbols.types_named(&name) {
                return Some(*only);
            }
        }
        None
    }

    /// `A.B` relative to `ty`: nested type `A` of `ty`, then its nested `B`.
    fn nested_path(&self, ty: TypeId, dotted: &str) -> Option<TypeId> {
        dotted
            .split('.')
            .try_fold(ty, |current, segment| self.symbols.nested_type(current, segment))
    }

    fn link_bases(&mut self) {
        let resolved: Vec<(TypeId, Vec<TypeId>)> = self
            .symbols
            .type_ids()
            .filter_map(|id| {
                let symbol = self.symbols.type_symbol(id)?;
                if symbol.base_names.is_empty() {
                    return None;
                }
                let bases = symbol
                    .base_names
                    .iter()
                    .filter_map(|(written, site)| {
                        let scope = TypeScope {
                            file: site.file,
                            namespace: symbol.namespace.clone(),
                            enclosing: symbol.outer,
                        };
                        self.resolve_type_name(&scope, written)
                    })
                    .filter(|&base| base != id)
                    .collect();
                Some((id, bases))
            })
            .collect();
        for (id, bases) in resolved {
            self.symbols.set_bases(id, bases);
        }
    }
}
