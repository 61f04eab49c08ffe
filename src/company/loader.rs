//! Load customer segment snapshots from CSV

use super::{CustomerSegment, SegmentKind};
use csv::Reader;
use std::error::Error;
use std::path::Path;

/// Raw CSV row matching the segments file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Segment")]
    segment: String,
    #[serde(rename = "Total")]
    total: u64,
    #[serde(rename = "New")]
    new: u64,
    #[serde(rename = "CAC")]
    cac: f64,
    #[serde(rename = "ChurnRate")]
    churn_rate: f64,
}

impl CsvRow {
    fn to_segment(self) -> Result<CustomerSegment, Box<dyn Error>> {
        let kind = match self.segment.as_str() {
            "B2B" => SegmentKind::B2B,
            "B2C" => SegmentKind::B2C,
            other => return Err(format!("Unknown Segment: {}", other).into()),
        };

        let segment = CustomerSegment::new(kind, self.total, self.new, self.cac, self.churn_rate);
        segment.validate()?;
        Ok(segment)
    }
}

/// Load all segment snapshots from a CSV file
pub fn load_segments<P: AsRef<Path>>(path: P) -> Result<Vec<CustomerSegment>, Box<dyn Error>> {
    let mut reader = Reader::from_path(path)?;
    let mut segments = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        segments.push(row.to_segment()?);
    }

    log::debug!("loaded {} customer segments", segments.len());
    Ok(segments)
}

/// Load segment snapshots from any reader (e.g., string buffer, network stream)
pub fn load_segments_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<CustomerSegment>, Box<dyn Error>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut segments = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        segments.push(row.to_segment()?);
    }

    Ok(segments)
}

/// Pick the first segment of a given kind from a loaded list
pub fn find_segment(segments: &[CustomerSegment], kind: SegmentKind) -> Option<CustomerSegment> {
    segments.iter().copied().find(|s| s.kind == kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Segment,Total,New,CAC,ChurnRate
B2B,20,5,500.0,2.0
B2C,80,15,50.0,5.0
";

    #[test]
    fn test_load_segments_from_reader() {
        let segments = load_segments_from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(segments.len(), 2);

        let b2b = find_segment(&segments, SegmentKind::B2B).unwrap();
        assert_eq!(b2b.total, 20);
        assert_eq!(b2b.new, 5);
        assert_eq!(b2b.cac, 500.0);

        let b2c = find_segment(&segments, SegmentKind::B2C).unwrap();
        assert_eq!(b2c.churn_rate, 5.0);
    }

    #[test]
    fn test_unknown_segment_kind_rejected() {
        let bad = "Segment,Total,New,CAC,ChurnRate\nEnterprise,20,5,500.0,2.0\n";
        assert!(load_segments_from_reader(bad.as_bytes()).is_err());
    }

    #[test]
    fn test_invalid_segment_state_rejected() {
        // More new customers than total must fail before any projection sees it
        let bad = "Segment,Total,New,CAC,ChurnRate\nB2B,5,6,500.0,2.0\n";
        assert!(load_segments_from_reader(bad.as_bytes()).is_err());
    }
}
