//! # Priority/Category Classifier
//!
//! Gán mức ưu tiên và nhóm chủ đề cho một mention đã được chấm điểm.

use super::lexicon::{contains, MatchMode};
use super::types::{AuxiliarySignals, Category, ClassificationResult, Priority};

const CRISIS_TERMS: &[&str] = &["down", "broken", "issue", "problem"];
const PRODUCT_TERMS: &[&str] = &["product", "feature", "update"];
const SERVICE_TERMS: &[&str] = &["service", "support", "help"];
const CAMPAIGN_TERMS: &[&str] = &["campaign", "ad", "marketing"];
const OPPORTUNITY_TERMS: &[&str] = &["recommend", "switch", "try"];

/// Ngưỡng score để một mention tích cực được coi là cơ hội
const OPPORTUNITY_MIN_SCORE: f64 = 0.5;

/// Phân loại đầy đủ một mention
pub fn classify(score: f64, text: &str, signals: &AuxiliarySignals) -> ClassificationResult {
    let text = text.to_lowercase();

    ClassificationResult {
        priority: priority_for(score, signals.viral_potential),
        category: category_for(score, &text),
        brand_mentions: find_mentions(&text, &signals.brand_keywords),
        competitor_mentions: find_mentions(&text, &signals.competitor_keywords),
    }
}

/// Mức ưu tiên, điều kiện đầu tiên khớp sẽ thắng
pub fn priority_for(score: f64, viral_potential: Option<f64>) -> Priority {
    let magnitude = score.abs();
    let viral = viral_potential.unwrap_or(0.0);

    if magnitude > 0.7 || viral > 0.8 {
        Priority::Critical
    } else if magnitude > 0.5 || viral > 0.6 {
        Priority::High
    } else if magnitude > 0.3 {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// Nhóm chủ đề theo chuỗi con trên text đã lowercase.
///
/// Báo sự cố được xét trước tiên để "service is down" rơi vào `Crisis`.
pub fn category_for(score: f64, text: &str) -> Category {
    if has_any(text, CRISIS_TERMS) {
        Category::Crisis
    } else if has_any(text, PRODUCT_TERMS) {
        Category::Product
    } else if has_any(text, SERVICE_TERMS) {
        Category::Service
    } else if has_any(text, CAMPAIGN_TERMS) {
        Category::Campaign
    } else if score > OPPORTUNITY_MIN_SCORE && has_any(text, OPPORTUNITY_TERMS) {
        Category::Opportunity
    } else {
        Category::Brand
    }
}

fn has_any(text: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| contains(text, term, MatchMode::Substring))
}

fn find_mentions(text: &str, keywords: &[String]) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for keyword in keywords {
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() || found.contains(&keyword) {
            continue;
        }
        if contains(text, &keyword, MatchMode::Substring) {
            found.push(keyword);
        }
    }
    found
}
