use crate::models::Route;

/// Startup banner printed before the server blocks
pub fn startup_summary(base_url: &str, routes: &[Route], direct_input: bool) -> String {
    if direct_input {
        return format!("mok is serving direct input on {}/\n", base_url);
    }

    let endpoints: Vec<String> = routes
        .iter()
        .map(|route| format!("GET {}", route.url_path))
        .collect();
    let width = endpoints
        .iter()
        .map(|endpoint| endpoint.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = format!("  mok is listening at {}\n\n  available endpoints:\n", base_url);
    for (endpoint, route) in endpoints.iter().zip(routes) {
        out.push_str(&format!(
            "   {:<width$}  ({})\n",
            endpoint,
            route.file_path,
            width = width
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_input_summary() {
        let summary = startup_summary("http://localhost:9172", &[], true);
        assert_eq!(summary, "mok is serving direct input on http://localhost:9172/\n");
    }

    #[test]
    fn test_route_summary_is_aligned() {
        let routes = vec![
            Route::new("testdata/a.json".to_string(), "/a.json".to_string()),
            Route::new("/tmp/users-list.json".to_string(), "/users-list.json".to_string()),
        ];

        let summary = startup_summary("http://localhost:8080", &routes, false);

        let expected = "  mok is listening at http://localhost:8080\n\
                        \n  available endpoints:\n   \
                        GET /a.json           (testdata/a.json)\n   \
                        GET /users-list.json  (/tmp/users-list.json)\n";
        assert_eq!(summary, expected);
    }
}
