use std::io::Write;

use crate::{error::Result, pipeline::MatchReport};

pub const CSV_HEADER: &str = "Rank,Candidate,Similarity_Score,Similarity_Percentage";

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Ranked candidates as CSV, header first.
/// Score with 4 decimals, percentage with 2 decimals and a `%` sign.
pub fn write_csv<W: Write>(report: &MatchReport, mut writer: W) -> Result<()> {
    writeln!(writer, "{CSV_HEADER}")?;
    for r in &report.ranked {
        writeln!(
            writer,
            "{},{},{:.4},{:.2}%",
            r.rank,
            csv_field(&r.name),
            r.score,
            r.score * 100.0
        )?;
    }
    writer.flush()?;
    Ok(())
}

pub fn to_csv(report: &MatchReport) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(report, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn to_json(report: &MatchReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        pipeline::{Explanation, RankedCandidate},
        ranker::stats::MatchCategory,
        vectorizer::VectorizerInfo,
    };
    use pretty_assertions::assert_eq;

    fn report() -> MatchReport {
        let entry = |rank, name: &str, score| RankedCandidate {
            rank,
            name: name.to_string(),
            score,
            category: MatchCategory::from_score(score),
            input_index: rank - 1,
            explanation: Explanation::Disabled,
        };
        MatchReport {
            ranked: vec![entry(1, "alice.txt", 0.81234), entry(2, "Smith, \"Bob\".pdf", 0.5)],
            statistics: None,
            total_analyzed: 2,
            top_k: 5,
            average_top_score: 0.65617,
            best_score: 0.81234,
            vectorizer: VectorizerInfo {
                kind: "tf-idf",
                max_vocabulary_size: 5000,
                dimension: Some(12),
                fitted: true,
                generation: Some(1),
            },
            explanation_provider: None,
        }
    }

    #[test]
    fn csv_rows_are_formatted_and_quoted() {
        let csv = to_csv(&report()).unwrap();
        assert_eq!(
            csv,
            "Rank,Candidate,Similarity_Score,Similarity_Percentage\n\
             1,alice.txt,0.8123,81.23%\n\
             2,\"Smith, \"\"Bob\"\".pdf\",0.5000,50.00%\n"
        );
    }

    #[test]
    fn json_contains_ranked_entries() {
        let json: serde_json::Value = serde_json::from_str(&to_json(&report()).unwrap()).unwrap();
        assert_eq!(json["ranked"][0]["name"], "alice.txt");
        assert_eq!(json["ranked"][0]["category"], "Excellent");
        assert_eq!(json["ranked"][1]["explanation"]["status"], "disabled");
        assert_eq!(json["total_analyzed"], 2);
    }
}
