/*!
# Matrix Builder

Turns a flat list of alteration records into the OncoPrint matrix:

1. **Sample axis**: distinct samples in a deterministic order ([`SampleOrder`])
2. **Gene axis**: distinct genes by descending alteration count, ties lexical
3. **Gene ratios**: percent of samples altered per gene
4. **Layers**: one background grid layer, then one stacked layer per
   [`AggregatedGroup`], all sharing the same row/column indices
*/

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::error::{OncoPrintError, Result};
use crate::labels::{gene_label, hover_text, percent};
use crate::palette::{describe, AlterationClass, LayerStyle, Palette, BACKGROUND_WIDTH};
use crate::trace::{BarLayer, Cell};
use crate::types::{AlterationRecord, AlterationType, Color};

/// Default bar-gap padding, as a fraction of one column
pub const DEFAULT_PADDING: f64 = 0.05;

/// Name of the background grid layer
pub const BACKGROUND_NAME: &str = "No alteration";

/// Column ordering rule for the sample axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleOrder {
    /// Order of first appearance in the record list
    FirstSeen,
    /// Lexical order of sample identifiers
    #[default]
    Lexical,
    /// Altered-in-top-gene first, then the next gene, and so on ("memo sort")
    Alteration,
}

/// Matrix builder configuration
#[derive(Debug, Clone)]
pub struct MatrixConfig {
    pub padding: f64,
    pub background_color: Color,
    pub sample_order: SampleOrder,
    pub palette: Palette,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            background_color: Color::default(),
            sample_order: SampleOrder::default(),
            palette: Palette::default(),
        }
    }
}

impl MatrixConfig {
    pub fn validate(&self) -> Result<()> {
        validate_padding(self.padding)?;
        self.background_color.validate()
    }
}

/// Padding must lie in the open interval (0, 0.5).
pub fn validate_padding(padding: f64) -> Result<()> {
    if padding.is_nan() || padding <= 0.0 || padding >= 0.5 {
        return Err(OncoPrintError::invalid_padding(padding));
    }
    Ok(())
}

/// Records sharing one visual layer, in input order
#[derive(Debug, Clone)]
pub struct AggregatedGroup<'a> {
    pub class: AlterationClass,
    pub alteration_type: AlterationType,
    pub events: Vec<&'a AlterationRecord>,
}

impl<'a> AggregatedGroup<'a> {
    pub fn display_name(&self) -> &'static str {
        self.class.display_name()
    }

    pub fn style(&self, palette: &Palette) -> LayerStyle {
        palette.style(self.class, &self.alteration_type)
    }
}

/// Bucket records by alteration class; groups come back in stacking order.
pub fn aggregate(records: &[AlterationRecord]) -> Vec<AggregatedGroup<'_>> {
    let mut groups: BTreeMap<AlterationClass, AggregatedGroup<'_>> = BTreeMap::new();

    for record in records {
        let class = AlterationClass::of(record);
        groups
            .entry(class)
            .or_insert_with(|| AggregatedGroup {
                class,
                alteration_type: record.alteration_type.clone(),
                events: Vec::new(),
            })
            .events
            .push(record);
    }

    groups.into_values().collect()
}

/// Distinct genes, most altered first; equal counts fall back to lexical order.
pub fn sorted_genes(records: &[AlterationRecord]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.gene.as_str()).or_insert(0) += 1;
    }

    let mut genes: Vec<(&str, usize)> = counts.into_iter().collect();
    genes.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    genes.into_iter().map(|(gene, _)| gene.to_string()).collect()
}

/// Distinct samples ordered by `order`. `genes` is the sorted gene axis,
/// consulted only by [`SampleOrder::Alteration`].
pub fn sorted_samples(records: &[AlterationRecord], order: SampleOrder, genes: &[String]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut samples: Vec<&str> = Vec::new();
    for record in records {
        if seen.insert(record.sample.as_str()) {
            samples.push(record.sample.as_str());
        }
    }

    match order {
        SampleOrder::FirstSeen => {}
        SampleOrder::Lexical => samples.sort_unstable(),
        SampleOrder::Alteration => {
            let altered: HashSet<(&str, &str)> = records
                .iter()
                .map(|r| (r.sample.as_str(), r.gene.as_str()))
                .collect();
            let patterns: HashMap<&str, Vec<bool>> = samples
                .iter()
                .map(|&sample| {
                    let row = genes
                        .iter()
                        .map(|gene| altered.contains(&(sample, gene.as_str())))
                        .collect();
                    (sample, row)
                })
                .collect();

            // `true > false`, so comparing b to a puts altered samples first
            samples.sort_by(|a, b| patterns[b].cmp(&patterns[a]).then_with(|| a.cmp(b)));
        }
    }

    samples.into_iter().map(str::to_string).collect()
}

/// Percent of `total_samples` with at least one alteration, per gene.
///
/// Duplicate records for the same (gene, sample) cell count once.
pub fn gene_ratios(records: &[AlterationRecord], total_samples: usize) -> BTreeMap<String, u8> {
    let mut altered: HashMap<&str, HashSet<&str>> = HashMap::new();
    for record in records {
        altered
            .entry(record.gene.as_str())
            .or_default()
            .insert(record.sample.as_str());
    }

    altered
        .into_iter()
        .map(|(gene, samples)| (gene.to_string(), percent(samples.len(), total_samples)))
        .collect()
}

/// Output of one render pass
#[derive(Debug, Clone)]
pub struct Matrix {
    pub genes: Vec<String>,
    pub samples: Vec<String>,
    pub gene_ratios: BTreeMap<String, u8>,
    /// Background grid first, then alteration layers in stacking order
    pub layers: Vec<BarLayer>,
}

impl Matrix {
    pub fn background(&self) -> &BarLayer {
        &self.layers[0]
    }

    pub fn alteration_layers(&self) -> &[BarLayer] {
        &self.layers[1..]
    }

    /// Number of alteration segments across all non-background layers
    pub fn segment_count(&self) -> usize {
        self.alteration_layers().iter().map(BarLayer::len).sum()
    }

    pub fn gene_labels(&self) -> Vec<String> {
        self.genes
            .iter()
            .map(|gene| gene_label(gene, self.gene_ratios.get(gene).copied().unwrap_or(0)))
            .collect()
    }

    pub fn into_layers(self) -> Vec<BarLayer> {
        self.layers
    }
}

#[derive(Debug)]
pub struct MatrixBuilder {
    config: MatrixConfig,
}

impl MatrixBuilder {
    pub fn new(config: MatrixConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MatrixConfig {
        &self.config
    }

    pub fn build(&self, records: &[AlterationRecord]) -> Matrix {
        let padding = self.config.padding;
        let length = 1.0 - 2.0 * padding;

        let genes = sorted_genes(records);
        let samples = sorted_samples(records, self.config.sample_order, &genes);
        let gene_ratios = gene_ratios(records, samples.len());

        let labels: Vec<String> = genes
            .iter()
            .map(|gene| gene_label(gene, gene_ratios.get(gene).copied().unwrap_or(0)))
            .collect();
        let rows: HashMap<&str, usize> = genes.iter().enumerate().map(|(i, g)| (g.as_str(), i)).collect();
        let columns: HashMap<&str, usize> = samples.iter().enumerate().map(|(i, s)| (s.as_str(), i)).collect();

        let mut layers = Vec::new();

        let mut background = BarLayer::new(BACKGROUND_NAME, self.config.background_color.clone(), BACKGROUND_WIDTH);
        for (column, sample) in samples.iter().enumerate() {
            for (row, label) in labels.iter().enumerate() {
                background.push_segment(
                    Cell { row, column },
                    column as f64 + padding,
                    length,
                    label.clone(),
                    sample.clone(),
                );
            }
        }
        layers.push(background);

        let unknown: BTreeSet<&str> = records
            .iter()
            .filter(|r| !r.alteration_type.is_known())
            .map(|r| r.alteration_type.as_str())
            .collect();
        for raw in &unknown {
            log::warn!("Unrecognized alteration type '{}', rendering with fallback style", raw);
        }

        for group in aggregate(records) {
            let style = group.style(&self.config.palette);
            let mut layer = BarLayer::new(style.name, style.color, style.width);

            for record in &group.events {
                // Axes are derived from the records, so both lookups always hit
                let row = rows[record.gene.as_str()];
                let column = columns[record.sample.as_str()];
                layer.push_segment(
                    Cell { row, column },
                    column as f64 + padding,
                    length,
                    labels[row].clone(),
                    hover_text(&record.sample, &describe(record)),
                );
            }
            layers.push(layer);
        }

        log::debug!(
            "Built OncoPrint matrix: {} genes x {} samples, {} alteration layers, {} records",
            genes.len(),
            samples.len(),
            layers.len() - 1,
            records.len()
        );

        Matrix { genes, samples, gene_ratios, layers }
    }
}

/// Build the matrix with default sample ordering and palette.
pub fn build_matrix(records: &[AlterationRecord], padding: f64, background_color: Color) -> Result<Matrix> {
    let builder = MatrixBuilder::new(MatrixConfig {
        padding,
        background_color,
        ..MatrixConfig::default()
    })?;
    Ok(builder.build(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(sample: &str, gene: &str, kind: &str, alteration: Option<&str>) -> AlterationRecord {
        AlterationRecord::new(sample, gene, AlterationType::from(kind), alteration)
    }

    fn demo_records() -> Vec<AlterationRecord> {
        vec![
            rec("S2", "TP53", "MISSENSE", Some("R175H")),
            rec("S1", "TP53", "TRUNC", Some("Q136*")),
            rec("S3", "KRAS", "MISSENSE", Some("G12D")),
            rec("S1", "EGFR", "CNA", Some("AMP")),
            rec("S3", "TP53", "CNA", Some("HOMDEL")),
        ]
    }

    #[test]
    fn test_gene_order_by_frequency_then_name() {
        let genes = sorted_genes(&demo_records());
        assert_eq!(genes, vec!["TP53", "EGFR", "KRAS"]);
    }

    #[test]
    fn test_sample_orders() {
        let records = demo_records();
        let genes = sorted_genes(&records);
        assert_eq!(sorted_samples(&records, SampleOrder::FirstSeen, &genes), vec!["S2", "S1", "S3"]);
        assert_eq!(sorted_samples(&records, SampleOrder::Lexical, &genes), vec!["S1", "S2", "S3"]);
        // patterns over [TP53, EGFR, KRAS]: S1=[1,1,0] S2=[1,0,0] S3=[1,0,1]
        assert_eq!(sorted_samples(&records, SampleOrder::Alteration, &genes), vec!["S1", "S3", "S2"]);
    }

    #[test]
    fn test_ratios_deduplicate_cells() {
        let mut records = demo_records();
        records.push(rec("S2", "TP53", "MISSENSE", Some("R248Q")));
        let ratios = gene_ratios(&records, 3);
        assert_eq!(ratios["TP53"], 100);
        assert_eq!(ratios["EGFR"], 33);
        assert_eq!(ratios["KRAS"], 33);
    }

    #[test]
    fn test_aggregate_preserves_input_order() {
        let records = vec![
            rec("S2", "TP53", "MISSENSE", None),
            rec("S1", "KRAS", "CNA", Some("AMP")),
            rec("S1", "TP53", "MISSENSE", None),
        ];
        let groups = aggregate(&records);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].class, AlterationClass::Amplification);
        assert_eq!(groups[1].class, AlterationClass::Missense);
        let samples: Vec<&str> = groups[1].events.iter().map(|r| r.sample.as_str()).collect();
        assert_eq!(samples, vec!["S2", "S1"]);
    }

    #[test]
    fn test_build_layers() {
        let matrix = build_matrix(&demo_records(), 0.1, Color::default()).unwrap();

        let background = matrix.background();
        assert_eq!(background.name, BACKGROUND_NAME);
        assert_eq!(background.len(), 9);
        assert_eq!(background.base[0], 0.1);
        assert!((background.x[0] - 0.8).abs() < 1e-12);

        assert_eq!(matrix.segment_count(), 5);
        let names: Vec<&str> = matrix.alteration_layers().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Amplification", "Deep Deletion", "Missense Mutation", "Truncating Mutation"]
        );

        let missense = &matrix.alteration_layers()[2];
        assert_eq!(missense.width, 0.4);
        assert_eq!(missense.text, vec!["S2<br>R175H", "S3<br>G12D"]);
        assert_eq!(missense.y, vec!["TP53 (100%)", "KRAS (33%)"]);
        assert!((missense.base[0] - 1.1).abs() < 1e-12);
    }

    #[test]
    fn test_empty_records() {
        let matrix = build_matrix(&[], DEFAULT_PADDING, Color::default()).unwrap();
        assert!(matrix.genes.is_empty());
        assert!(matrix.samples.is_empty());
        assert!(matrix.gene_ratios.is_empty());
        assert_eq!(matrix.layers.len(), 1);
        assert!(matrix.background().is_empty());
    }

    #[test]
    fn test_padding_out_of_range_rejected() {
        for padding in [0.0, 0.5, -0.1, 0.75, f64::NAN] {
            let err = build_matrix(&demo_records(), padding, Color::default()).unwrap_err();
            assert!(matches!(err, OncoPrintError::InvalidPadding { .. }));
        }
    }
}
