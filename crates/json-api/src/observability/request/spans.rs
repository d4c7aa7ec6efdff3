//! Route templates for span names and metric labels.

/// Collapse numeric path segments into `{id}` so `/api/tickets/42` and
/// `/api/tickets/43` share one span name and one metric series.
pub(super) fn route_template(path: &str) -> String {
    let template = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if segment.bytes().all(|byte| byte.is_ascii_digit()) {
                "{id}"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/");

    format!("/{template}")
}

#[cfg(test)]
mod tests {
    use super::route_template;

    #[test]
    fn numeric_ids_are_collapsed() {
        assert_eq!(route_template("/api/tickets/42"), "/api/tickets/{id}");
        assert_eq!(
            route_template("/api/tickets/7/comments"),
            "/api/tickets/{id}/comments"
        );
    }

    #[test]
    fn named_segments_are_kept() {
        assert_eq!(route_template("/api/tickets/my"), "/api/tickets/my");
        assert_eq!(route_template("/api/users/12a"), "/api/users/12a");
        assert_eq!(route_template("/"), "/");
    }
}
