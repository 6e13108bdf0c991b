use std::path::Path;

use super::*;
use crate::DiagnosticKind;
use cc2dx_catalog::TargetVersion;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn translate_with(version: TargetVersion, source: &str, kind: FileKind) -> TranslatedFile {
    let catalog = Catalog::new(version);
    Translator::new(&catalog).translate(source, kind).unwrap()
}

fn source(text: &str) -> TranslatedFile {
    translate_with(TargetVersion::V2, text, FileKind::Source)
}

fn header(text: &str) -> TranslatedFile {
    translate_with(TargetVersion::V2, text, FileKind::Header)
}

fn texts(file: &TranslatedFile) -> Vec<&str> {
    file.tokens.iter().map(|t| t.text.as_str()).collect()
}

fn without_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

// === Message sends ===

#[test]
fn send_to_self_without_arguments() {
    let file = source("[self foo]");
    assert_eq!(file.compact(), "this->foo()");
    assert_eq!(file.open_brackets, 0);
}

#[test]
fn subscript_keeps_brackets() {
    assert_eq!(source("array[0];").compact(), "array[0];");
}

#[test]
fn multi_part_send() {
    assert_eq!(
        source("[obj doThing:x withOption:y];").compact(),
        "obj->doThing(x,/*withOption*/y);"
    );
}

#[test]
fn multi_part_send_tokens() {
    let file = source("[obj doThing:x withOption:y]");
    assert_eq!(
        texts(&file),
        vec!["obj", "->doThing(", "x", ", /*withOption*/", "y", ")"]
    );
}

#[test]
fn factory_method_becomes_create() {
    assert_eq!(
        source(r#"[CCSprite spriteWithFile:@"a.png"]"#).compact(),
        r#"CCSprite::create("a.png")"#
    );
}

#[test]
fn nested_send_is_the_outer_receiver() {
    assert_eq!(source("[[Foo alloc] init]").compact(), "Foo::alloc()->init()");
}

#[test]
fn super_calls_are_scoped() {
    assert_eq!(source("[super init]").compact(), "__SUPER_CLASS__::init()");
}

#[test]
fn send_after_return() {
    assert_eq!(source("return [self foo];").compact(), "returnthis->foo();");
}

#[test]
fn send_as_argument() {
    assert_eq!(
        source("[self addChild:[CCSprite node] z:1];").compact(),
        "this->addChild(CCSprite::create(),/*z*/1);"
    );
}

#[test]
fn qualified_name_is_a_receiver() {
    assert_eq!(
        source("[cocos2d::CCDirector sharedDirector]").compact(),
        "cocos2d::CCDirector::sharedDirector()"
    );
}

#[test]
fn unmatched_closing_bracket_is_fatal() {
    let catalog = Catalog::default();
    let err = Translator::new(&catalog)
        .translate("x]", FileKind::Source)
        .unwrap_err();
    assert_eq!(
        err,
        InvariantViolation::UnmatchedClosingBracket { span: Span::new(1, 2) }
    );
}

#[test]
fn selector_part_outside_send_is_verbatim() {
    assert_eq!(source("a ? b : c;").compact(), "a?b:c;");
    assert_eq!(source("case one: break;").compact(), "caseone:break;");
}

// === Classes and methods ===

#[test]
fn interface_with_one_method() {
    let file = header("@interface Foo\n- (void)bar;\n@end");
    assert_eq!(
        texts(&file),
        vec!["class Foo", "\n", "void", "bar(", ");", "\n", "}; // Foo"]
    );
    assert_eq!(file.final_brace_depth, 0);
    assert!(file.diagnostics.is_empty());
}

#[test]
fn interface_with_ivars() {
    let file = header("@interface Foo : CCObject {\n\tint x;\n}\n- (void)bar;\n@end\n");
    assert_eq!(
        file.compact(),
        "classFoo:cocos2d::CCObject{intx;voidbar();};//Foo"
    );
    assert_eq!(file.final_brace_depth, 0);
}

#[test]
fn static_method_in_header() {
    let file = header("@interface Foo\n+ (Foo *)node;\n@end");
    let texts = texts(&file);
    assert!(texts.contains(&"static Foo *"), "{texts:?}");
    assert!(texts.contains(&"node("), "{texts:?}");
}

#[test]
fn static_method_in_source_has_no_storage_class() {
    let file = source("@implementation Foo\n+ (Foo *)node {\n}\n@end");
    let texts = texts(&file);
    assert!(texts.contains(&"Foo *"), "{texts:?}");
    assert!(texts.contains(&"Foo::node("), "{texts:?}");
}

#[test]
fn implementation_method_with_parts() {
    let file = source("@implementation Foo\n- (void)setX:(int)x y:(int)y {\n}\n@end");
    assert_eq!(
        texts(&file),
        vec![
            "//@implementation Foo",
            "\n",
            "void",
            "Foo::setX(",
            "int",
            "x",
            ", /*y*/",
            "int",
            "y",
            "){",
            "\n",
            "}",
            "\n",
            "//@end",
        ]
    );
    assert_eq!(file.final_brace_depth, 0);
}

#[test]
fn method_body_is_translated() {
    let file = source(
        "@implementation Foo\n- (id)init {\n\tif ((self = [super init])) {\n\t\tscore = 0;\n\t}\n\treturn self;\n}\n@end\n",
    );
    assert_eq!(
        file.compact(),
        "//@implementationFooCCObject*Foo::init(){if((this=__SUPER_CLASS__::init())){score=0;}returnthis;}//@end"
    );
    assert_eq!(file.final_brace_depth, 0);
    assert!(file.diagnostics.is_empty());
}

#[test]
fn selector_references() {
    let file = source(
        "@implementation Bar\n- (void)go {\n\t[self schedule:@selector(tick:)];\n\tx = @selector(foo);\n\ty = @selector(foo:);\n}\n@end\n",
    );
    let selectors: Vec<&str> = file
        .tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Selector)
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(
        selectors,
        vec![
            "schedule_selector(Bar::tick)",
            "callfunc_selector(Bar::foo)",
            "@selector(Bar::foo)",
        ]
    );
    assert!(texts(&file).contains(&"Bar::go("));
}

#[test]
fn selector_without_class_warns() {
    let file = source("x = @selector(foo);");
    assert!(texts(&file).contains(&"callfunc_selector(foo)"));
    assert_eq!(
        file.diagnostics[0].kind,
        DiagnosticKind::MissingClassContext { construct: "@selector" }
    );
}

#[test]
fn end_outside_class_is_commented() {
    let file = source("@end");
    assert_eq!(texts(&file), vec!["//@end"]);
}

#[test]
fn properties_are_commented_out() {
    let file = header("@property (nonatomic) int x;\n");
    assert_eq!(file.tokens[0].text, "//@property (nonatomic) int x;");
    assert_eq!(file.tokens[0].kind, TokenKind::Comment);
}

#[test]
fn forward_class() {
    assert_eq!(source("@class Foo;").compact(), "classFoo;");
}

#[test]
fn self_property_access() {
    assert_eq!(source("self.score = 0;").compact(), "this->score=0;");
}

#[test]
fn minus_in_expression_is_an_operator() {
    assert_eq!(source("a = b - c;").compact(), "a=b-c;");
}

// === Literals and directives ===

#[test]
fn log_call_and_format_string() {
    assert_eq!(
        source(r#"NSLog(@"%@", name);"#).compact(),
        r#"CCLog("%s",name);"#
    );
}

#[test]
fn escaped_percent_survives() {
    let file = source(r#"s = @"%%@";"#);
    assert!(texts(&file).contains(&r#""%%@""#));
}

#[test]
fn imports() {
    let file = source("#import <Foundation/Foundation.h>\n#import \"Foo.h\"\n");
    let directives: Vec<&str> = file
        .tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Directive)
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(
        directives,
        vec!["//#import <Foundation/Foundation.h>", "#include \"Foo.h\""]
    );
}

#[test]
fn define_body_is_translated() {
    assert_eq!(texts(&source("#define FOO NSLog")), vec!["#define ", "FOO", "CCLog"]);
}

#[test]
fn pragma_once_is_recorded() {
    let guarded = header("#pragma once\n@interface A\n@end");
    assert!(guarded.emitted_pragma_once);
    assert!(!guarded.needs_include_guard());

    assert!(header("@interface A\n@end").needs_include_guard());
    assert!(!source("int x;").needs_include_guard());
}

#[test]
fn casts() {
    assert!(texts(&source("x = (NSString *)y;")).contains(&"(CCString *)"));
    assert!(texts(&header("x = (NSString *)y;")).contains(&"(cocos2d::CCString *)"));
    assert!(texts(&source("x = (int)y;")).contains(&"(int)"));
}

#[test]
fn header_identifiers_are_qualified() {
    assert_eq!(header("CCNode *n;").compact(), "cocos2d::CCNode*n;");
    assert_eq!(source("CCNode *n;").compact(), "CCNode*n;");
    assert_eq!(header("CCLog(x);").compact(), "CCLog(x);");
}

// === Layout ===

#[test]
fn newline_runs_collapse() {
    assert_eq!(texts(&source("a\n\n\nb\nc")), vec!["a", "\n\n", "b", "\n", "c"]);
}

#[test]
fn newlines_carry_depth() {
    let file = source("{\nx;\n}\ny;");
    let indents: Vec<Option<u32>> = file
        .tokens
        .iter()
        .filter_map(|t| t.is_newline().then(|| t.kind.indent()))
        .collect();
    assert_eq!(indents, vec![Some(1), Some(1), Some(0)]);
}

// === Recovery ===

#[test]
fn unbalanced_closing_brace_clamps() {
    let file = source("}");
    assert_eq!(file.final_brace_depth, 0);
    assert_eq!(
        file.diagnostics,
        vec![Diagnostic::unbalanced_closing_brace(Span::new(0, 1))]
    );
    assert_eq!(texts(&file), vec!["}"]);
}

#[test]
fn deprecated_names_noted_for_v3() {
    let file = translate_with(TargetVersion::V3, "NSString *s;", FileKind::Source);
    assert_eq!(
        file.diagnostics,
        vec![Diagnostic::deprecated_name(Span::new(0, 8), "CCString")]
    );
    let file = translate_with(TargetVersion::V2, "NSString *s;", FileKind::Source);
    assert!(file.diagnostics.is_empty());
}

#[test]
fn v3_renames_apply() {
    let file = translate_with(TargetVersion::V3, "NSArray *a;", FileKind::Source);
    assert_eq!(file.compact(), "Vector*a;");
}

#[test]
fn plain_cpp_is_unchanged() {
    let input = "int main(int argc, char **argv) {\n\tint total = argc + 1;\n\tif (total > 2) {\n\t\treturn total;\n\t}\n\treturn 0;\n}\n";
    let file = source(input);
    assert_eq!(file.compact(), without_whitespace(input));
    assert_eq!(file.final_brace_depth, 0);
    assert!(file.diagnostics.is_empty());
}

#[test]
fn block_comments_pass_through() {
    let file = source("x = a * b; /* c */");
    assert_eq!(texts(&file), vec!["x", "=", "a", "*", "b", ";", "/* c */"]);
    assert!(file.diagnostics.is_empty());

    let file = source("/* a\n * b\n */\nint x;");
    assert_eq!(texts(&file)[0], "/* a\n * b\n */");
    assert_eq!(file.compact(), "/*a*b*/intx;");
}

#[test]
fn doc_comment_before_method_declaration() {
    let file = source("@implementation Foo\n/*\n * Bar\n */\n- (void)bar {\n}\n/* next */\n- (int)baz {\n}\n@end\n");
    assert_eq!(
        file.compact(),
        "//@implementationFoo/**Bar*/voidFoo::bar(){}/*next*/intFoo::baz(){}//@end"
    );
    assert_eq!(file.final_brace_depth, 0);
    assert!(file.diagnostics.is_empty());
}

#[test]
fn open_paren_keeps_its_contents() {
    assert_eq!(source("foo(x, y);").compact(), "foo(x,y);");
    assert_eq!(source("if (total > 2) {}").compact(), "if(total>2){}");
    let file = source("if ((self = [super init])) {}");
    assert_eq!(file.compact(), "if((this=__SUPER_CLASS__::init())){}");
    assert!(file.diagnostics.is_empty());
}

#[test]
fn unterminated_string_skips_one_character() {
    let file = source("x = \"abc;\ny = 1;");
    assert_eq!(
        file.diagnostics,
        vec![Diagnostic::unexpected_character(Span::new(4, 5), '"')]
    );
    assert_eq!(file.compact(), "x=abc;y=1;");
}

#[test]
fn file_kind_from_path() {
    assert_eq!(FileKind::from_path(Path::new("a/B.h")), Some(FileKind::Header));
    assert_eq!(FileKind::from_path(Path::new("B.m")), Some(FileKind::Source));
    assert_eq!(FileKind::from_path(Path::new("B.mm")), Some(FileKind::Source));
    assert_eq!(FileKind::from_path(Path::new("B.cpp")), None);
    assert_eq!(FileKind::from_path(Path::new("Makefile")), None);
}

// === Properties ===

fn nested_send(depth: usize) -> String {
    (0..depth).fold("obj".to_string(), |inner, _| format!("[{inner} foo]"))
}

fn balanced_blocks(ops: &[u8]) -> String {
    let mut out = String::new();
    let mut depth = 0usize;
    for op in ops {
        match op {
            0 => {
                out.push_str("{\n");
                depth += 1;
            }
            1 if depth > 0 => {
                out.push_str("}\n");
                depth -= 1;
            }
            _ => out.push_str("x = y;\n"),
        }
    }
    out.push_str(&"}\n".repeat(depth));
    out
}

const PLAIN_WORDS: &[&str] = &["int", "value", "total", "count", "return", "float", "sum"];

proptest! {
    #[test]
    fn nested_sends_close_once_each(depth in 1usize..8) {
        let file = source(&format!("x = {};", nested_send(depth)));
        let closers = file
            .tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Bracket && t.text == ")")
            .count();
        prop_assert_eq!(closers, depth);
        prop_assert_eq!(file.open_brackets, 0);
        prop_assert_eq!(file.compact(), format!("x=obj{};", "->foo()".repeat(depth)));
    }

    #[test]
    fn balanced_braces_end_at_depth_zero(ops in proptest::collection::vec(0u8..3, 0..48)) {
        let file = source(&balanced_blocks(&ops));
        prop_assert_eq!(file.final_brace_depth, 0);
        prop_assert!(file.diagnostics.is_empty());
    }

    #[test]
    fn plain_statements_are_idempotent(
        words in proptest::collection::vec(proptest::sample::select(PLAIN_WORDS), 1..12)
    ) {
        let input = format!("{{\n{};\n}}\n", words.join(" = "));
        let file = source(&input);
        prop_assert_eq!(file.compact(), without_whitespace(&input));
    }
}
