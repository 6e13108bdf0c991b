use std::io;
use std::sync::{Arc, Mutex};

use super::*;
use cc2dx_catalog::TargetVersion;
use cc2dx_lexer::DiagnosticKind;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

const HEADER: &str = "@interface Hero : CCSprite\n- (void)jump;\n@end\n";
const SOURCE: &str = "#import \"Hero.h\"\n\n@implementation Hero\n- (void)jump {\n\t[self runAction:[CCJumpBy actionWithDuration:1]];\n}\n@end\n";

fn sequential() -> ConvertConfig {
    ConvertConfig {
        parallel: false,
        ..ConvertConfig::default()
    }
}

#[test]
fn converts_header_in_place_and_source_to_cpp() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("Hero.h"), HEADER).unwrap();
    fs::write(dir.path().join("Hero.m"), SOURCE).unwrap();

    let summary = Converter::new(sequential()).convert_path(dir.path());
    assert_eq!(summary.converted(), 2);
    assert_eq!(summary.failed(), 0);

    let header = fs::read_to_string(dir.path().join("Hero.h")).unwrap();
    assert!(header.starts_with("#pragma once\nclass Hero : cocos2d::CCSprite"), "{header}");
    assert!(header.contains("void jump( );"), "{header}");

    assert!(!dir.path().join("Hero.m").exists());
    let cpp = fs::read_to_string(dir.path().join("Hero.cpp")).unwrap();
    assert!(cpp.contains("#include \"Hero.h\""), "{cpp}");
    assert!(cpp.contains("void Hero::jump( ){"), "{cpp}");
    assert!(cpp.contains("this ->runAction( CCJumpBy ::create( 1 ) ) ;"), "{cpp}");
}

#[test]
fn reports_come_back_in_path_order() {
    let dir = tempdir().unwrap();
    for name in ["C.m", "A.m", "B.h"] {
        fs::write(dir.path().join(name), "int x;\n").unwrap();
    }
    let summary = Converter::new(ConvertConfig::default()).convert_path(dir.path());
    let names: Vec<String> = summary
        .files
        .iter()
        .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["A.m", "B.h", "C.m"]);
    assert_eq!(summary.converted(), 3);
}

#[test]
fn backup_keeps_the_original() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("Hero.m"), SOURCE).unwrap();
    let config = ConvertConfig {
        backup: true,
        ..sequential()
    };

    let summary = Converter::new(config).convert_path(dir.path());
    assert_eq!(summary.converted(), 1);
    assert_eq!(fs::read_to_string(dir.path().join("Hero.m.bak")).unwrap(), SOURCE);
    assert!(dir.path().join("Hero.cpp").exists());
}

#[test]
fn invariant_violation_leaves_file_untouched() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Broken.m");
    fs::write(&path, "x];\n").unwrap();

    let summary = Converter::new(sequential()).convert_path(dir.path());
    assert_eq!(summary.failed(), 1);
    assert!(summary.has_failures());
    let report = &summary.files[0];
    assert!(matches!(report.error, Some(DriverError::Translate { .. })));
    assert_eq!(report.output, None);
    assert_eq!(fs::read_to_string(&path).unwrap(), "x];\n");
    assert!(!dir.path().join("Broken.cpp").exists());
}

#[test]
fn diagnostics_are_located() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("Odd.m"), "int x;\n}\n").unwrap();

    let summary = Converter::new(sequential()).convert_path(dir.path());
    let report = &summary.files[0];
    assert!(report.is_ok());
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!((report.diagnostics[0].line, report.diagnostics[0].column), (2, 1));
    assert_eq!(
        report.diagnostics[0].diagnostic.kind,
        DiagnosticKind::UnbalancedClosingBrace
    );
    assert_eq!(summary.warnings(), 1);
}

/// Log sink shared between a test and its subscriber.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn warnings_are_logged_at_warn_level() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("Odd.m"), "NSString *s;\n}\n").unwrap();

    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let converter = Converter::new(ConvertConfig {
        target: TargetVersion::V3,
        ..sequential()
    });
    let summary = tracing::subscriber::with_default(subscriber, || converter.convert_path(dir.path()));
    assert_eq!(summary.files[0].diagnostics.len(), 2);

    let logged = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
    assert!(logged.contains("WARN"), "{logged}");
    assert!(logged.contains("`}` without a matching `{`"), "{logged}");
    assert!(!logged.contains("deprecated"), "{logged}");
}

#[test]
fn target_version_selects_catalog() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("List.m"), "NSArray *items;\n").unwrap();
    let config = ConvertConfig {
        target: TargetVersion::V3,
        ..sequential()
    };

    Converter::new(config).convert_path(dir.path());
    let cpp = fs::read_to_string(dir.path().join("List.cpp")).unwrap();
    assert_eq!(cpp, "Vector * items ;\n");
}

#[test]
fn parallel_matches_sequential() {
    let seq_dir = tempdir().unwrap();
    let par_dir = tempdir().unwrap();
    for dir in [&seq_dir, &par_dir] {
        for i in 0..8 {
            fs::write(dir.path().join(format!("S{i}.m")), SOURCE).unwrap();
        }
    }

    Converter::new(sequential()).convert_path(seq_dir.path());
    Converter::new(ConvertConfig::default()).convert_path(par_dir.path());

    for i in 0..8 {
        let name = format!("S{i}.cpp");
        assert_eq!(
            fs::read_to_string(seq_dir.path().join(&name)).unwrap(),
            fs::read_to_string(par_dir.path().join(&name)).unwrap()
        );
    }
}

#[test]
fn preview_writes_nothing() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("A.h"), "@interface A\n@end\n").unwrap();
    fs::write(dir.path().join("B.m"), SOURCE).unwrap();
    let converter = Converter::new(sequential());

    let text = converter.preview(dir.path(), false).unwrap().unwrap();
    assert_eq!(text, "#pragma once\nclass A\n}; // A\n");
    let listing = converter.preview(dir.path(), true).unwrap().unwrap();
    assert!(listing.contains("CLASSMARKER \"class A\""), "{listing}");

    assert_eq!(fs::read_to_string(dir.path().join("A.h")).unwrap(), "@interface A\n@end\n");
    assert!(dir.path().join("B.m").exists());
}

#[test]
fn preview_of_empty_dir() {
    let dir = tempdir().unwrap();
    assert_eq!(Converter::new(sequential()).preview(dir.path(), false).unwrap(), None);
}
