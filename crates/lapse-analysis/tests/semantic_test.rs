//! The C# semantic model answering host queries.

use lapse_analysis::semantic::{Compilation, SemanticModel, Symbol, SyntaxNode, TypeKind};
use lapse_analysis::{AssignmentOperator, SemanticHost, SymbolKind};

const PARTIAL_FIRST: &str = include_str!("fixtures/partial_first.cs");
const PARTIAL_SECOND: &str = include_str!("fixtures/partial_second.cs");

fn assignments<'c>(model: &SemanticModel<'c>, op: AssignmentOperator) -> Vec<SyntaxNode<'c>> {
    let compilation = model.compilation();
    compilation
        .file_ids()
        .filter_map(|id| model.root(id))
        .flat_map(|root| model.descendants(root).collect::<Vec<_>>())
        .filter(|node| model.assignment_operator(*node) == op)
        .collect()
}

fn partial_compilation() -> Compilation {
    Compilation::from_sources(&[
        ("partial_first.cs", PARTIAL_FIRST),
        ("partial_second.cs", PARTIAL_SECOND),
    ])
    .unwrap()
}

#[test]
fn partial_declarations_merge_into_one_type() {
    let compilation = partial_compilation();
    let symbols = compilation.symbols();

    let window = symbols
        .type_by_qualified_name("Lapse.Fixtures.Partial.Window")
        .expect("Window declared");
    let ty = symbols.type_symbol(window).unwrap();
    assert_eq!(ty.kind, TypeKind::Class);
    assert_eq!(ty.declarations.len(), 2);
    assert_eq!(symbols.types_named("Window"), &[window]);

    let model = SemanticModel::new(&compilation);
    let roots = model.declaring_syntax(&Symbol::Type(window));
    let files: Vec<_> = roots.iter().map(|n| n.file).collect();
    assert_eq!(files.len(), 2);
    assert_ne!(files[0], files[1]);
}

#[test]
fn subscription_and_removal_bind_to_the_same_symbols() {
    let compilation = partial_compilation();
    let model = SemanticModel::new(&compilation);

    let adds = assignments(&model, AssignmentOperator::Add);
    let removes = assignments(&model, AssignmentOperator::Subtract);
    assert_eq!(adds.len(), 1);
    assert_eq!(removes.len(), 1);

    let bind = |node: SyntaxNode<'_>| {
        let left = model.left_operand(node).unwrap();
        let right = model.right_operand(node).unwrap();
        assert!(model.is_member_access(left));
        (model.resolve_symbol(left).unwrap(), model.resolve_symbol(right).unwrap())
    };
    let (add_event, add_handler) = bind(adds[0]);
    let (remove_event, remove_handler) = bind(removes[0]);

    assert_eq!(model.symbol_kind(&add_event), SymbolKind::Event);
    assert_eq!(model.symbol_kind(&add_handler), SymbolKind::Method);
    assert!(model.symbols_equal(&add_event, &remove_event));
    assert!(model.symbols_equal(&add_handler, &remove_handler));
}

#[test]
fn containing_type_of_subscription_is_the_partial_type() {
    let compilation = partial_compilation();
    let model = SemanticModel::new(&compilation);
    let add = assignments(&model, AssignmentOperator::Add)[0];

    let method = model.containing_symbol(add).unwrap();
    assert_eq!(model.symbol_kind(&method), SymbolKind::Method);
    let ty = model.containing_type(&method).unwrap();
    let window = compilation
        .symbols()
        .type_by_qualified_name("Lapse.Fixtures.Partial.Window")
        .unwrap();
    assert_eq!(ty, Symbol::Type(window));
}

#[test]
fn location_is_one_based() {
    let compilation = partial_compilation();
    let model = SemanticModel::new(&compilation);
    let add = assignments(&model, AssignmentOperator::Add)[0];

    let location = model.location(add);
    assert_eq!(location.file, "partial_first.cs");
    assert_eq!((location.line, location.column), (16, 13));
    assert_eq!(location.end_line, 16);
    assert_eq!(
        &PARTIAL_FIRST[location.start_byte..location.end_byte],
        "_publisher.Changed += OnChanged"
    );
}

#[test]
fn nested_types_use_dotted_qualified_names() {
    let src = r#"
namespace App
{
    class Outer
    {
        public class Inner
        {
            public static event System.Action Ping;
        }

        void Attach() { Inner.Ping += Pong; }
        void Pong() { }
    }
}
"#;
    let compilation = Compilation::from_sources(&[("nested.cs", src)]).unwrap();
    let symbols = compilation.symbols();
    let inner = symbols.type_by_qualified_name("App.Outer.Inner").expect("nested type");
    let outer = symbols.type_by_qualified_name("App.Outer").unwrap();
    assert_eq!(symbols.type_symbol(inner).unwrap().outer, Some(outer));

    let model = SemanticModel::new(&compilation);
    let add = assignments(&model, AssignmentOperator::Add)[0];
    let event = model.resolve_symbol(model.left_operand(add).unwrap()).unwrap();
    assert_eq!(model.symbol_kind(&event), SymbolKind::Event);
}

#[test]
fn using_alias_resolves_receiver_type() {
    let src = r#"
using Hub = Lapse.Messaging.Hub;

namespace Lapse.Messaging
{
    public static class Hub
    {
        public static event System.Action Posted;
    }
}

namespace App
{
    class Reader
    {
        void Attach() { Hub.Posted += OnPosted; }
        void OnPosted() { }
    }
}
"#;
    let compilation = Compilation::from_sources(&[("alias.cs", src)]).unwrap();
    let model = SemanticModel::new(&compilation);
    let add = assignments(&model, AssignmentOperator::Add)[0];
    let event = model.resolve_symbol(model.left_operand(add).unwrap()).unwrap();
    assert_eq!(model.symbol_kind(&event), SymbolKind::Event);
}

#[test]
fn lambdas_bind_to_distinct_symbols() {
    let src = r#"
class Host
{
    void Run()
    {
        System.Action a = () => { };
        System.Action b = () => { };
    }
}
"#;
    let compilation = Compilation::from_sources(&[("lambdas.cs", src)]).unwrap();
    let model = SemanticModel::new(&compilation);
    let root = model.root(compilation.file_ids().next().unwrap()).unwrap();
    let lambdas: Vec<Symbol> = model
        .descendants(root)
        .filter(|n| n.kind() == "parenthesized_lambda_expression" || n.kind() == "lambda_expression")
        .filter_map(|n| model.resolve_symbol(n))
        .collect();
    assert_eq!(lambdas.len(), 2);
    assert!(!model.symbols_equal(&lambdas[0], &lambdas[1]));
    assert_eq!(model.symbol_kind(&lambdas[0]), SymbolKind::Method);
}

#[test]
fn files_with_syntax_errors_still_build() {
    let broken = "class Broken { void M( { }";
    let compilation = Compilation::from_sources(&[("broken.cs", broken)]).unwrap();
    assert!(compilation.files()[0].has_errors());
    assert!(compilation.symbols().types_named("Broken").len() <= 1);
}
