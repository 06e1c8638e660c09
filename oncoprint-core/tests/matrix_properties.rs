use oncoprint_core::matrix::{sorted_genes, BACKGROUND_NAME};
use oncoprint_core::{build_matrix, AlterationRecord, AlterationType, Cell, Color, MatrixBuilder, MatrixConfig, SampleOrder};
use std::collections::{BTreeSet, HashMap, HashSet};

fn rec(sample: &str, gene: &str, kind: &str, alteration: Option<&str>) -> AlterationRecord {
    AlterationRecord::new(sample, gene, AlterationType::from(kind), alteration)
}

fn cohort() -> Vec<AlterationRecord> {
    vec![
        rec("TCGA-05", "TP53", "MISSENSE", Some("R273H")),
        rec("TCGA-02", "TP53", "TRUNC", Some("R213*")),
        rec("TCGA-02", "TP53", "MISSENSE", Some("R248Q")),
        rec("TCGA-01", "KRAS", "MISSENSE", Some("G12C")),
        rec("TCGA-03", "EGFR", "CNA", Some("AMP")),
        rec("TCGA-03", "EGFR", "EXP", Some("UP")),
        rec("TCGA-04", "CDKN2A", "CNA", Some("HOMDEL")),
        rec("TCGA-04", "ALK", "FUSION", Some("EML4-ALK")),
        rec("TCGA-01", "PTEN", "PROMOTER", None),
        rec("TCGA-05", "KRAS", "CNA", Some("GAIN")),
        rec("TCGA-06", "MYC", "methylation", None),
        rec("TCGA-02", "TP53", "MISSENSE", Some("R248Q")),
    ]
}

#[test]
fn axes_cover_every_gene_and_sample_once() {
    let records = cohort();
    let matrix = build_matrix(&records, 0.05, Color::default()).unwrap();

    let genes: BTreeSet<&str> = records.iter().map(|r| r.gene.as_str()).collect();
    let samples: BTreeSet<&str> = records.iter().map(|r| r.sample.as_str()).collect();

    assert_eq!(matrix.genes.len(), genes.len());
    assert_eq!(matrix.samples.len(), samples.len());
    assert_eq!(matrix.genes.iter().map(String::as_str).collect::<BTreeSet<_>>(), genes);
    assert_eq!(matrix.samples.iter().map(String::as_str).collect::<BTreeSet<_>>(), samples);
}

#[test]
fn genes_ordered_by_frequency_with_lexical_ties() {
    let records = cohort();
    let genes = sorted_genes(&records);

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for r in &records {
        *counts.entry(r.gene.as_str()).or_default() += 1;
    }
    for pair in genes.windows(2) {
        let (a, b) = (counts[pair[0].as_str()], counts[pair[1].as_str()]);
        assert!(a >= b, "{} before {} but {} < {}", pair[0], pair[1], a, b);
        if a == b {
            assert!(pair[0] < pair[1]);
        }
    }
    assert_eq!(genes, vec!["TP53", "EGFR", "KRAS", "ALK", "CDKN2A", "MYC", "PTEN"]);

    // deterministic across calls
    assert_eq!(sorted_genes(&records), genes);
}

#[test]
fn ratios_count_distinct_samples() {
    let matrix = build_matrix(&cohort(), 0.05, Color::default()).unwrap();
    let n = matrix.samples.len();
    assert_eq!(n, 6);

    // TP53 altered in TCGA-02 (three records) and TCGA-05
    assert_eq!(matrix.gene_ratios["TP53"], 33);
    assert_eq!(matrix.gene_ratios["KRAS"], 33);
    assert_eq!(matrix.gene_ratios["EGFR"], 17);
    assert!(matrix.gene_labels().contains(&"TP53 (33%)".to_string()));
}

#[test]
fn every_record_becomes_exactly_one_segment() {
    let records = cohort();
    let matrix = build_matrix(&records, 0.05, Color::default()).unwrap();

    assert_eq!(matrix.segment_count(), records.len());
    for layer in matrix.alteration_layers() {
        assert_eq!(layer.base.len(), layer.x.len());
        assert_eq!(layer.base.len(), layer.y.len());
        assert_eq!(layer.base.len(), layer.text.len());
        assert!(!layer.is_empty());
    }
}

#[test]
fn alteration_segments_align_with_background() {
    let matrix = build_matrix(&cohort(), 0.1, Color::default()).unwrap();
    let background = matrix.background();
    assert_eq!(background.name, BACKGROUND_NAME);
    assert_eq!(background.len(), matrix.genes.len() * matrix.samples.len());

    let grid: HashMap<Cell, (f64, &str)> = background
        .cells
        .iter()
        .zip(background.base.iter().zip(background.y.iter()))
        .map(|(cell, (base, label))| (*cell, (*base, label.as_str())))
        .collect();
    assert_eq!(grid.len(), background.len());

    let labels = matrix.gene_labels();
    for layer in matrix.alteration_layers() {
        for (i, cell) in layer.cells.iter().enumerate() {
            let (base, label) = grid[cell];
            assert_eq!(layer.base[i], base);
            assert_eq!(layer.y[i], label);
            assert_eq!(layer.y[i], labels[cell.row]);
            assert!(layer.text[i].starts_with(&matrix.samples[cell.column]));
        }
    }
}

#[test]
fn unknown_type_falls_back_without_failing() {
    let _ = env_logger::builder().is_test(true).try_init();

    let matrix = build_matrix(&cohort(), 0.05, Color::default()).unwrap();
    let fallback = matrix
        .alteration_layers()
        .iter()
        .find(|l| l.name == "Other Alteration")
        .expect("fallback layer");
    assert_eq!(fallback.len(), 1);
    assert_eq!(fallback.width, 0.4);
    assert_eq!(fallback.color().as_str(), "#7F7F7F");
    assert_eq!(fallback.text, vec!["TCGA-06<br>methylation"]);
}

#[test]
fn unrecognized_cna_direction_survives_in_hover_text() {
    let records = vec![rec("S1", "TP53", "CNA", Some("LOSS"))];
    let matrix = build_matrix(&records, 0.05, Color::default()).unwrap();

    let layers = matrix.alteration_layers();
    assert_eq!(layers.len(), 1);
    assert_eq!(layers[0].name, "Copy Number Alteration");
    assert_eq!(layers[0].text, vec!["S1<br>LOSS"]);
}

#[test]
fn stacking_order_ignores_input_order() {
    let mut reversed = cohort();
    reversed.reverse();

    let a = build_matrix(&cohort(), 0.05, Color::default()).unwrap();
    let b = build_matrix(&reversed, 0.05, Color::default()).unwrap();
    let names = |m: &oncoprint_core::Matrix| -> Vec<String> { m.layers.iter().map(|l| l.name.clone()).collect() };

    assert_eq!(names(&a), names(&b));
    assert_eq!(
        names(&a),
        vec![
            "No alteration",
            "Amplification",
            "Gain",
            "Deep Deletion",
            "mRNA Upregulation",
            "Missense Mutation",
            "Truncating Mutation",
            "Promoter Mutation",
            "Fusion",
            "Other Alteration",
        ]
    );
}

#[test]
fn memo_sort_puts_top_gene_carriers_first() {
    let builder = MatrixBuilder::new(MatrixConfig {
        sample_order: SampleOrder::Alteration,
        ..MatrixConfig::default()
    })
    .unwrap();
    let matrix = builder.build(&cohort());

    let tp53: HashSet<&str> = ["TCGA-02", "TCGA-05"].into_iter().collect();
    let leading: HashSet<&str> = matrix.samples[..2].iter().map(String::as_str).collect();
    assert_eq!(leading, tp53);
}

#[test]
fn duplicate_cells_render_one_segment_per_record() {
    let records = vec![
        rec("S1", "TP53", "MISSENSE", Some("R175H")),
        rec("S1", "TP53", "MISSENSE", Some("R175H")),
    ];
    let matrix = build_matrix(&records, 0.05, Color::default()).unwrap();
    assert_eq!(matrix.segment_count(), 2);
    assert_eq!(matrix.gene_ratios["TP53"], 100);
}
