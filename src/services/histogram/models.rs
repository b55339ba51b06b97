use serde::Serialize;

///
/// How a bin midpoint is turned into the label reported to clients.
/// Continuous distributions report hundredths, dice sums report whole
/// numbers.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelPolicy {
    RoundHundredths,
    Truncate,
}

impl LabelPolicy {
    pub fn apply(&self, midpoint: f64) -> f64 {
        match self {
            LabelPolicy::RoundHundredths => (midpoint * 100.0).round() / 100.0,
            LabelPolicy::Truncate => midpoint.trunc(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub representative: f64,
    pub weight: f64,
}

///
/// Index-aligned histogram: `bins[i]` is the label of the bin
/// holding `weights[i]` samples
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramResult {
    #[serde(rename = "Bins")]
    pub bins: Vec<f64>,
    #[serde(rename = "Values")]
    pub weights: Vec<f64>,
}

impl HistogramResult {
    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }
}

impl From<Vec<Bin>> for HistogramResult {
    fn from(bins: Vec<Bin>) -> Self {
        let (bins, weights) = bins.into_iter().map(|b| (b.representative, b.weight)).unzip();
        Self { bins, weights }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_policies() {
        assert_eq!(LabelPolicy::RoundHundredths.apply(3.14159), 3.14);
        assert_eq!(LabelPolicy::RoundHundredths.apply(0.005), 0.01);
        assert_eq!(LabelPolicy::Truncate.apply(699.9), 699.0);
        assert_eq!(LabelPolicy::Truncate.apply(-1.5), -1.0);
    }

    #[test]
    fn test_serializes_with_wire_names() {
        let res = HistogramResult { bins: vec![1.0, 2.0], weights: vec![3.0, 4.0] };
        assert_eq!(serde_json::to_string(&res).unwrap(), r#"{"Bins":[1.0,2.0],"Values":[3.0,4.0]}"#);
    }
}
