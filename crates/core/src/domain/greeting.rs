/// Name rendered when the caller supplies none.
pub const DEFAULT_NAME: &str = "App Service";

/// Rendering context key the greeting view reads the name from.
pub const NAME_KEY: &str = "name";

/// View identifier of the greeting page.
pub const GREETING_VIEW: &str = "hello";

/// Resolves the optional `name` parameter. Blank values fall back to the
/// default the same way an absent parameter does.
pub fn resolve_name(requested: Option<&str>) -> &str {
    match requested {
        Some(name) if !name.is_empty() => name,
        _ => DEFAULT_NAME,
    }
}
