use serde_json::Value;

use super::store::ProductMatch;

/// Sentinel inserted when the search returns nothing.
pub const NO_MATCH_SENTINEL: &str = "ไม่พบข้อมูลสินค้าที่ตรงกับคำถาม";

const PRICE_PLACEHOLDER: &str = "-";
const LINK_PLACEHOLDER: &str = "#";

/// Render ranked product rows into the prompt context digest.
///
/// One line per row, absent metadata replaced by placeholders. Order is
/// preserved: the store already ranks rows best-first.
pub fn build_product_context(matches: &[ProductMatch]) -> String {
    if matches.is_empty() {
        return NO_MATCH_SENTINEL.to_string();
    }

    matches
        .iter()
        .map(|m| {
            format!(
                "- {} (ราคา: {} | Link: {})",
                m.content,
                render_price(m.metadata.price.as_ref()),
                m.metadata.link.as_deref().unwrap_or(LINK_PLACEHOLDER),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_price(price: Option<&Value>) -> String {
    match price {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        _ => PRICE_PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rag::store::ProductMetadata;
    use serde_json::json;

    fn product(content: &str, price: Option<Value>, link: Option<&str>) -> ProductMatch {
        ProductMatch {
            content: content.to_string(),
            metadata: ProductMetadata {
                model: None,
                price,
                link: link.map(|l| l.to_string()),
            },
        }
    }

    #[test]
    fn renders_one_line_per_product() {
        let matches = vec![
            product(
                "ฟิล์มใส iPhone 15",
                Some(json!(259)),
                Some("https://shop.example/ip15"),
            ),
            product("ฟิล์มด้าน iPhone 15", Some(json!("299 บาท")), None),
        ];

        let context = build_product_context(&matches);
        let lines: Vec<&str> = context.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "- ฟิล์มใส iPhone 15 (ราคา: 259 | Link: https://shop.example/ip15)"
        );
        assert_eq!(lines[1], "- ฟิล์มด้าน iPhone 15 (ราคา: 299 บาท | Link: #)");
    }

    #[test]
    fn absent_metadata_gets_placeholders() {
        let context = build_product_context(&[product("ฟิล์มกันมอง", None, None)]);
        assert_eq!(context, "- ฟิล์มกันมอง (ราคา: - | Link: #)");
    }

    #[test]
    fn empty_result_yields_sentinel() {
        assert_eq!(build_product_context(&[]), NO_MATCH_SENTINEL);
    }

    #[test]
    fn null_price_is_a_placeholder_not_a_panic() {
        let context = build_product_context(&[product("ฟิล์ม", Some(Value::Null), None)]);
        assert!(context.contains("ราคา: -"));
    }
}
