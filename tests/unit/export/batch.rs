use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "ribbon_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn defaults_match_the_shipped_exporter() {
    let opts = ExportOpts::default();
    assert_eq!(opts.out_dir, PathBuf::from("public/img/ribbons"));
    assert_eq!(opts.count, 6);
    assert_eq!(opts.size, 800);
    assert_eq!(opts.zoom, 1.35);
    assert_eq!(opts.stroke, "white");
    assert!(opts.validate().is_ok());
}

#[test]
fn invalid_opts_are_rejected() {
    let bad = [
        ExportOpts {
            size: 0,
            ..ExportOpts::default()
        },
        ExportOpts {
            zoom: f64::NAN,
            ..ExportOpts::default()
        },
        ExportOpts {
            stroke_width: 0.0,
            ..ExportOpts::default()
        },
        ExportOpts {
            stroke: " ".to_string(),
            ..ExportOpts::default()
        },
        ExportOpts {
            stroke: "white\"/><script".to_string(),
            ..ExportOpts::default()
        },
        ExportOpts {
            threads: Some(0),
            ..ExportOpts::default()
        },
    ];
    for opts in bad {
        assert!(export_batch(&opts).is_err(), "{opts:?}");
    }
}

#[test]
fn generate_ribbon_is_deterministic_and_depth_sorted() {
    let opts = ExportOpts::default();
    let a = generate_ribbon(1234.5, &opts).unwrap();
    let b = generate_ribbon(1234.5, &opts).unwrap();
    assert_eq!(a.svg, b.svg);

    assert_eq!(a.strands.len(), a.config.lines);
    assert_eq!(a.svg.matches("<path ").count(), a.config.lines);
    assert!(a.strands.windows(2).all(|w| w[0].avg_z <= w[1].avg_z));
}

#[test]
fn different_seeds_change_path_data() {
    let opts = ExportOpts::default();
    let a = generate_ribbon(10.0, &opts).unwrap();
    let b = generate_ribbon(20.0, &opts).unwrap();
    assert_ne!(a.svg, b.svg);
    assert!(b.svg.contains(r#"viewBox="0 0 800 800""#));
}

#[test]
fn batch_with_base_seed_is_reproducible() {
    let dir_a = temp_dir("batch_a");
    let dir_b = temp_dir("batch_b");
    let run = |dir: &PathBuf| {
        export_batch(&ExportOpts {
            out_dir: dir.clone(),
            count: 3,
            base_seed: Some(99),
            threads: Some(2),
            ..ExportOpts::default()
        })
        .unwrap()
    };
    let ra = run(&dir_a);
    let rb = run(&dir_b);

    assert_eq!(ra.files.len(), 3);
    for (fa, fb) in ra.files.iter().zip(&rb.files) {
        assert_eq!(fa.seed, fb.seed);
        assert_eq!(
            std::fs::read_to_string(&fa.svg_path).unwrap(),
            std::fs::read_to_string(&fb.svg_path).unwrap()
        );
    }
    assert_eq!(
        ra.files.iter().map(|f| f.slot).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert!(dir_a.join("ribbon-3.svg").exists());
    assert!(!dir_a.join("ribbon-4.svg").exists());
    assert!(ra.files.iter().all(|f| f.png_path.is_none()));

    let _ = std::fs::remove_dir_all(dir_a);
    let _ = std::fs::remove_dir_all(dir_b);
}
