/// Split a query into at most `max_subqueries` clauses at `?`, `.` and `!`.
///
/// A query without clause boundaries is its own single sub-query; a blank
/// query has none.
pub fn plan_subqueries(query: &str, max_subqueries: usize) -> Vec<String> {
    let cleaned = query.trim();
    if cleaned.is_empty() {
        return Vec::new();
    }
    let parts: Vec<String> = cleaned
        .split(['?', '.', '!'])
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .take(max_subqueries.max(1))
        .map(str::to_string)
        .collect();
    if parts.is_empty() {
        vec![cleaned.to_string()]
    } else {
        parts
    }
}
