//! Mock analytics values for the analytics contract.
//!
//! Until real activity data is collected, each contract entry gets an
//! illustrative value so that Inven!RA can exercise the full response shape.

use proplan_types::{ActivityId, AnalyticsContract, AnalyticsValue, StudentAnalytics};
use serde_json::Value;

const SAMPLE_REFLECTION: &str = "Sample reflection: the team met the deadline, \
     with a slight cost increase to keep quality.";

fn example_integer(name: &str) -> i64 {
    match name {
        "decisions_count" => 12,
        "total_time_seconds" => 3600,
        "cost_variance" => -500,
        "schedule_variance_days" => 2,
        "client_satisfaction_score" => 4,
        "replans_count" => 1,
        _ => 0,
    }
}

/// URL of a per-student qualitative report, e.g. the decision log.
pub fn report_url(
    base_url: &str,
    activity_id: &ActivityId,
    student_id: &str,
    report: &str,
) -> String {
    format!("{base_url}/analytics/{activity_id}/{student_id}/{report}")
}

fn qualitative_value(
    name: &str,
    kind: &str,
    base_url: &str,
    activity_id: &ActivityId,
    student_id: &str,
) -> Value {
    match kind {
        "URL" => {
            let report = match name {
                "decision_log_url" => "decision-log",
                "timeline_url" => "timeline",
                other => other,
            };
            Value::String(report_url(base_url, activity_id, student_id, report))
        }
        "text/plain" => match name {
            "postmortem_reflection" => Value::String(SAMPLE_REFLECTION.to_string()),
            _ => Value::String("Sample text.".to_string()),
        },
        _ => Value::Null,
    }
}

/// Builds the analytics of one student from the contract.
///
/// Only `integer` quantitative entries are reported; qualitative entries are
/// always reported, with `null` for types that have no example.
pub fn mock_student_analytics(
    contract: &AnalyticsContract,
    base_url: &str,
    activity_id: &ActivityId,
    student_id: &str,
) -> StudentAnalytics {
    let quant_analytics = contract
        .quant_analytics
        .iter()
        .filter(|qa| qa.kind == "integer")
        .map(|qa| AnalyticsValue {
            name: qa.name.clone(),
            kind: qa.kind.clone(),
            value: Value::from(example_integer(&qa.name)),
        })
        .collect();

    let qual_analytics = contract
        .qual_analytics
        .iter()
        .map(|qa| AnalyticsValue {
            name: qa.name.clone(),
            kind: qa.kind.clone(),
            value: qualitative_value(&qa.name, &qa.kind, base_url, activity_id, student_id),
        })
        .collect();

    StudentAnalytics {
        invenira_std_id: student_id.to_string(),
        quant_analytics,
        qual_analytics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proplan_types::AnalyticsDescriptor;

    fn descriptor(name: &str, kind: &str) -> AnalyticsDescriptor {
        AnalyticsDescriptor {
            name: name.to_string(),
            kind: kind.to_string(),
        }
    }

    fn contract() -> AnalyticsContract {
        AnalyticsContract {
            quant_analytics: vec![
                descriptor("decisions_count", "integer"),
                descriptor("cost_variance", "integer"),
                descriptor("unknown_metric", "integer"),
                descriptor("ratio", "float"),
            ],
            qual_analytics: vec![
                descriptor("decision_log_url", "URL"),
                descriptor("timeline_url", "URL"),
                descriptor("evidence", "URL"),
                descriptor("postmortem_reflection", "text/plain"),
                descriptor("notes", "text/plain"),
                descriptor("chart", "image/png"),
            ],
        }
    }

    #[test]
    fn quantitative_values_follow_examples() {
        let id = ActivityId::parse("A1").expect("valid id");
        let analytics = mock_student_analytics(&contract(), "https://h", &id, "1001");

        assert_eq!(analytics.invenira_std_id, "1001");
        let values: Vec<(&str, &Value)> = analytics
            .quant_analytics
            .iter()
            .map(|v| (v.name.as_str(), &v.value))
            .collect();
        assert_eq!(
            values,
            vec![
                ("decisions_count", &Value::from(12)),
                ("cost_variance", &Value::from(-500)),
                ("unknown_metric", &Value::from(0)),
            ]
        );
    }

    #[test]
    fn qualitative_values_build_report_urls() {
        let id = ActivityId::parse("A1").expect("valid id");
        let analytics = mock_student_analytics(&contract(), "https://h", &id, "1001");
        let qual = &analytics.qual_analytics;

        assert_eq!(qual.len(), 6);
        assert_eq!(qual[0].value, "https://h/analytics/A1/1001/decision-log");
        assert_eq!(qual[1].value, "https://h/analytics/A1/1001/timeline");
        assert_eq!(qual[2].value, "https://h/analytics/A1/1001/evidence");
        assert_eq!(qual[3].value, SAMPLE_REFLECTION);
        assert_eq!(qual[4].value, "Sample text.");
        assert_eq!(qual[5].value, Value::Null);
    }
}
