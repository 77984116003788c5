//! 预测结果展示

use std::fmt::Write;

use super::ClientError;
use crate::prediction::types::PredictionResult;

/// 置信度百分比
///
/// `clamp(0, 100, 100 - 区间宽度 / 价格 * 50)`，±10% 区间下恒为 90。
/// 价格 <= 0 或结果不是有限值时返回 0。
pub fn confidence_percentage(result: &PredictionResult) -> f64 {
    let price = result.predicted_price;
    if price <= 0.0 || !price.is_finite() {
        return 0.0;
    }
    let value = 100.0 - (result.confidence_interval.width() / price * 50.0);
    if !value.is_finite() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

/// 格式化为印度卢比（千位分隔，两位小数）
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("₹{}", amount);
    }

    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("₹{}{}.{}", sign, grouped, frac_part)
}

/// 渲染预测结果（终端文本）
pub fn render_result(result: &PredictionResult) -> String {
    let input = &result.input_data;
    let details = [
        ("Airline", input.airline.clone()),
        ("From → To", format!("{} → {}", input.source, input.destination)),
        ("Date", input.date_of_journey.clone()),
        ("Departure", input.dep_time.clone()),
        ("Arrival", input.arrival_time.clone()),
        ("Duration", input.duration.clone()),
        ("Stops", input.total_stops.clone()),
        ("Route", input.route.clone()),
        ("Additional", input.additional_info.clone()),
    ];

    let mut out = String::new();
    let _ = writeln!(out, "Predicted Flight Price: {}", format_currency(result.predicted_price));
    let _ = writeln!(
        out,
        "Confidence Interval: {} - {}",
        format_currency(result.confidence_interval.lower),
        format_currency(result.confidence_interval.upper)
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Flight Details");
    for (label, value) in &details {
        let _ = writeln!(out, "  {:<12} {}", label, value);
    }

    if !result.feature_importance.is_empty() {
        let mut features: Vec<_> = result.feature_importance.iter().collect();
        features.sort_by(|a, b| b.1.total_cmp(a.1));
        let _ = writeln!(out);
        let _ = writeln!(out, "Feature Importance");
        for (name, importance) in features {
            let _ = writeln!(out, "  {:<24} {:.4}", name, importance);
        }
    }

    let _ = writeln!(out);
    let _ = write!(out, "Confidence Score: {:.0}%", confidence_percentage(result));
    out
}

/// 客户端显示状态
///
/// 成功结果整体替换当前显示内容；失败只记录错误，保留上一次结果
#[derive(Debug, Default)]
pub struct ClientSession {
    current: Option<PredictionResult>,
    last_error: Option<String>,
}

impl ClientSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, outcome: Result<PredictionResult, ClientError>) {
        match outcome {
            Ok(result) => {
                self.current = Some(result);
                self.last_error = None;
            }
            Err(e) => self.last_error = Some(e.to_string()),
        }
    }

    pub fn current(&self) -> Option<&PredictionResult> {
        self.current.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::types::{ConfidenceInterval, FlightQuery};

    fn result(price: f64) -> PredictionResult {
        PredictionResult::new(price, FlightQuery::example())
    }

    #[test]
    fn test_confidence_is_ninety_for_positive_prices() {
        for price in [1.0, 5000.0, 123456.78] {
            let value = confidence_percentage(&result(price));
            assert!((value - 90.0).abs() < 1e-9, "price {} -> {}", price, value);
        }
    }

    #[test]
    fn test_confidence_is_zero_for_non_positive_prices() {
        assert_eq!(confidence_percentage(&result(0.0)), 0.0);
        assert_eq!(confidence_percentage(&result(-500.0)), 0.0);
        assert_eq!(confidence_percentage(&result(f64::NAN)), 0.0);
    }

    #[test]
    fn test_confidence_is_clamped() {
        let mut wide = result(100.0);
        wide.confidence_interval = ConfidenceInterval {
            lower: -500.0,
            upper: 500.0,
        };
        assert_eq!(confidence_percentage(&wide), 0.0);

        let mut inverted = result(100.0);
        inverted.confidence_interval = ConfidenceInterval {
            lower: 110.0,
            upper: 90.0,
        };
        assert_eq!(confidence_percentage(&inverted), 100.0);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(5000.0), "₹5,000.00");
        assert_eq!(format_currency(4500.0), "₹4,500.00");
        assert_eq!(format_currency(999.999), "₹1,000.00");
        assert_eq!(format_currency(12.5), "₹12.50");
        assert_eq!(format_currency(1234567.891), "₹1,234,567.89");
        assert_eq!(format_currency(-1234.5), "₹-1,234.50");
        assert_eq!(format_currency(0.0), "₹0.00");
    }

    #[test]
    fn test_render_result() {
        let text = render_result(&result(5000.0));

        assert!(text.contains("Predicted Flight Price: ₹5,000.00"));
        assert!(text.contains("Confidence Interval: ₹4,500.00 - ₹5,500.00"));
        assert!(text.contains("Banglore → New Delhi"));
        assert!(text.contains("01:10 22 Mar"));
        assert!(!text.contains("Feature Importance"));
        assert!(text.ends_with("Confidence Score: 90%"));
    }

    #[test]
    fn test_render_feature_importance_when_present() {
        let mut with_importance = result(5000.0);
        with_importance.feature_importance.insert("Duration".to_string(), 0.12);
        with_importance.feature_importance.insert("Airline".to_string(), 0.55);

        let text = render_result(&with_importance);
        let airline = text.find("Airline                  0.5500").unwrap();
        let duration = text.find("Duration                 0.1200").unwrap();
        assert!(airline < duration);
    }

    #[test]
    fn test_session_replaces_on_success_and_keeps_on_error() {
        let mut session = ClientSession::new();
        assert!(session.current().is_none());

        session.apply(Ok(result(1000.0)));
        session.apply(Ok(result(2000.0)));
        assert_eq!(session.current().unwrap().predicted_price, 2000.0);

        session.apply(Err(ClientError::Api {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            body: r#"{"detail":"Prediction failed: boom"}"#.to_string(),
        }));
        assert_eq!(session.current().unwrap().predicted_price, 2000.0);
        assert_eq!(
            session.last_error(),
            Some(r#"Error: {"detail":"Prediction failed: boom"}"#)
        );

        session.apply(Ok(result(3000.0)));
        assert!(session.last_error().is_none());
    }
}
