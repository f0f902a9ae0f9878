use super::*;

#[test]
fn substitutes_known_tokens_and_keeps_unknown() {
    let vars = ContentVars::new()
        .with(CLIENT_NAME, "Acme")
        .with(CTA_TEXT, "Shop now");
    assert_eq!(vars.substitute("Hi {{client_name}}!"), "Hi Acme!");
    assert_eq!(vars.substitute("{{unknown}}"), "{{unknown}}");
    assert_eq!(vars.get(CTA_TEXT), Some("Shop now"));
}

#[test]
fn empty_values_leave_placeholder_unresolved() {
    let vars = ContentVars::new().with(CLIENT_TAGLINE, "  ");
    assert_eq!(vars.resolve("{{client_tagline}}"), None);
    assert_eq!(vars.resolve("   "), None);
    assert_eq!(vars.resolve(" Literal "), Some("Literal".to_string()));
}

#[test]
fn collects_from_pairs() {
    let vars: ContentVars = [(MAIN_MESSAGE, "50% off")].into_iter().collect();
    assert_eq!(vars.resolve("{{main_message}}").as_deref(), Some("50% off"));
}

#[test]
fn drawable_rejects_blank_and_placeholder_content() {
    assert_eq!(drawable("  Sale  "), Some("Sale"));
    assert_eq!(drawable(" \t"), None);
    assert_eq!(drawable("{{cta_text}}"), None);
    assert_eq!(drawable("  {{cta_text}} now"), None);
}
