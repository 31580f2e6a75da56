#[test]
fn catalog_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/catalog_error_pass.rs");
}
