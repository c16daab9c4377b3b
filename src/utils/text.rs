/// 超过 `max_chars` 个字符时截断并追加 `...`
pub fn truncate_description(description: &str, max_chars: usize) -> String {
    match description.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &description[..byte_idx]),
        None => description.to_string(),
    }
}

/// 构造 `LIKE '%term%'` 的匹配串, 转义 `\`, `%`, `_` (配合 ESCAPE '\')
pub fn like_contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// 分 -> 元
pub fn cents_to_major(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// 拼接 media 前缀与存储路径, 保证中间恰好一个 `/`
pub fn media_path(media_url: &str, image: &str) -> String {
    format!(
        "{}/{}",
        media_url.trim_end_matches('/'),
        image.trim_start_matches('/')
    )
}

/// 查询参数中的可选 id: 缺省或空串视为未提供
pub fn parse_optional_id(raw: Option<&str>, field: &str) -> crate::AppResult<Option<i32>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v.parse().map(Some).map_err(|_| {
            crate::AppError::ValidationError(format!("{field} must be an integer"))
        }),
    }
}
