/// Lazily compile a literal regex once and hand out a `&'static Regex`.
///
/// Only for patterns written inline in source; anything assembled from a
/// dataset goes through `engine::compiler` and reports a `CompileError`.
#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}
