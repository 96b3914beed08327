//! Asset path templating.

/// Join an asset template onto the assets sub-directory using POSIX separators.
///
/// Hash placeholders such as `[chunkhash]` are left untouched; they are
/// resolved by the build engine, not here.
///
/// ```
/// use kiln_config::assets_path;
///
/// assert_eq!(
///     assets_path("static", "js/[name].[chunkhash].js"),
///     "static/js/[name].[chunkhash].js"
/// );
/// assert_eq!(assets_path("", "css/app.css"), "css/app.css");
/// ```
pub fn assets_path(sub_directory: &str, template: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in sub_directory.split('/').chain(template.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                if matches!(segments.last(), Some(last) if *last != "..") {
                    segments.pop();
                } else {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if sub_directory.starts_with('/') {
        format!("/{joined}")
    } else {
        joined
    }
}
