use ndarray::{arr2, Array2};
use num_complex::Complex64;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use sprs::{CsMat, TriMat};
use sprs_colorings::check;
use sprs_colorings::{
    compress, compress_dense, compute_coloring, decompress, ColoringError,
    ColoringProblem, ConflictGraph, GreedyColoringAlgorithm, Order,
    Partition, SparsityPattern, Structure,
};

const ORDERS: [Order; 6] = [
    Order::Natural,
    Order::Random { seed: Some(0) },
    Order::LargestFirst,
    Order::SmallestLast,
    Order::IncidenceDegree,
    Order::DynamicLargestFirst,
];

fn jacobian() -> Array2<i64> {
    arr2(&[[0, 2, 3, 0], [0, 0, 0, 4], [1, 5, 0, 0], [0, 6, 7, 0]])
}

fn random_matrix(
    rng: &mut SmallRng,
    shape: (usize, usize),
    density: f64,
) -> CsMat<f64> {
    let mut tri = TriMat::new(shape);
    for i in 0..shape.0 {
        for j in 0..shape.1 {
            if rng.random_bool(density) {
                tri.add_triplet(i, j, rng.random_range(1.0..2.0));
            }
        }
    }
    tri.to_csc()
}

fn random_symmetric_matrix(
    rng: &mut SmallRng,
    n: usize,
    density: f64,
) -> CsMat<f64> {
    let mut tri = TriMat::new((n, n));
    for i in 0..n {
        for j in i..n {
            if rng.random_bool(density) {
                let val = rng.random_range(1.0..2.0);
                tri.add_triplet(i, j, val);
                if i != j {
                    tri.add_triplet(j, i, val);
                }
            }
        }
    }
    tri.to_csc()
}

#[test]
fn dense_column_compression() {
    let a = jacobian();
    let pattern = SparsityPattern::from_dense(a.view());
    let problem = ColoringProblem::from_names("nonsymmetric", "column")
        .unwrap();
    let result =
        compute_coloring(&pattern, problem, GreedyColoringAlgorithm::default())
            .unwrap();
    let (colors, basis, (row_inds, col_inds)) = result.into_parts();
    assert!(check::structurally_orthogonal_columns(&pattern, &colors));

    let b = compress_dense(a.view(), &basis).unwrap();
    let a2 = decompress(b.view(), row_inds.view(), col_inds.view()).unwrap();
    assert_eq!(a2.to_dense(), a);
}

#[test]
fn dense_row_compression() {
    let a = jacobian();
    let pattern = SparsityPattern::from_dense(a.view());
    let problem = ColoringProblem::from_names("nonsymmetric", "row").unwrap();
    let result =
        compute_coloring(&pattern, problem, GreedyColoringAlgorithm::default())
            .unwrap();
    let (colors, basis, (row_inds, col_inds)) = result.into_parts();
    assert!(check::structurally_orthogonal_rows(&pattern, &colors));
    assert_eq!(basis.shape().1, 4);

    let b = compress_dense(a.view(), &basis).unwrap();
    assert_eq!(b.dim(), (basis.ncolors(), 4));
    let a2 = decompress(b.view(), row_inds.view(), col_inds.view()).unwrap();
    assert_eq!(a2.to_dense(), a);
}

#[test]
fn symmetric_arrow_compression() {
    let mut tri = TriMat::new((10, 10));
    tri.add_triplet(0, 0, 10.);
    for i in 1..10 {
        tri.add_triplet(i, i, i as f64);
        tri.add_triplet(i, 0, 10. + i as f64);
        tri.add_triplet(0, i, 10. + i as f64);
    }
    let a: CsMat<f64> = tri.to_csc();
    let pattern = SparsityPattern::from_csmat(a.view());
    for partition in [Partition::Column, Partition::Row] {
        let problem = ColoringProblem::new(Structure::Symmetric, partition);
        let result = compute_coloring(
            &pattern,
            problem,
            GreedyColoringAlgorithm::default(),
        )
        .unwrap();
        // the center conflicts with all leaves, which all conflict with
        // each other through the center
        assert_eq!(result.coloring.ncolors(), 10);
        let b = compress(a.view(), &result.basis).unwrap();
        let a2 = result.decompress(b.view()).unwrap();
        assert_eq!(a2.to_dense(), a.to_dense());
    }
}

#[test]
fn random_nonsymmetric_roundtrip() {
    let mut rng = SmallRng::seed_from_u64(1234);
    for _ in 0..20 {
        let shape = (rng.random_range(1..30), rng.random_range(1..30));
        let density = rng.random_range(0.05..0.5);
        let a = random_matrix(&mut rng, shape, density);
        let pattern = SparsityPattern::from_csmat(a.view());
        for partition in [Partition::Column, Partition::Row] {
            let problem =
                ColoringProblem::new(Structure::Nonsymmetric, partition);
            let graph = ConflictGraph::new(&pattern, problem).unwrap();
            for order in ORDERS {
                let result = compute_coloring(
                    &pattern,
                    problem,
                    GreedyColoringAlgorithm::new(order),
                )
                .unwrap();
                let colors = result.coloring.colors();
                match partition {
                    Partition::Column => assert!(
                        check::structurally_orthogonal_columns(
                            &pattern, colors
                        )
                    ),
                    Partition::Row => assert!(
                        check::structurally_orthogonal_rows(&pattern, colors)
                    ),
                }
                assert!(result.coloring.ncolors() <= graph.max_degree() + 1);

                let b = result.compress(a.view()).unwrap();
                let a2 = result.decompress(b.view()).unwrap();
                assert_eq!(a2.to_dense(), a.to_dense());

                let b_csr = result.compress(a.to_csr().view()).unwrap();
                assert_eq!(b_csr, b);
            }
        }
    }
}

#[test]
fn random_symmetric_roundtrip() {
    let mut rng = SmallRng::seed_from_u64(42);
    for _ in 0..20 {
        let n = rng.random_range(1..30);
        let density = rng.random_range(0.05..0.4);
        let a = random_symmetric_matrix(&mut rng, n, density);
        let pattern = SparsityPattern::from_csmat(a.view());
        for partition in [Partition::Column, Partition::Row] {
            let problem = ColoringProblem::new(Structure::Symmetric, partition);
            let graph = ConflictGraph::new(&pattern, problem).unwrap();
            for order in ORDERS {
                let result = compute_coloring(
                    &pattern,
                    problem,
                    GreedyColoringAlgorithm::new(order),
                )
                .unwrap();
                let colors = result.coloring.colors();
                assert!(check::is_proper(&graph, colors));
                assert!(check::is_star_coloring(&graph, colors));
                assert!(check::symmetrically_orthogonal_columns(
                    &pattern, colors
                ));

                let b = result.compress(a.view()).unwrap();
                let a2 = result.decompress(b.view()).unwrap();
                assert_eq!(a2.to_dense(), a.to_dense());
            }
        }
    }
}

#[test]
fn complex_values() {
    let mut tri = TriMat::new((3, 3));
    tri.add_triplet(0, 0, Complex64::new(1., 1.));
    tri.add_triplet(1, 1, Complex64::new(2., -1.));
    tri.add_triplet(2, 1, Complex64::new(0., 3.));
    tri.add_triplet(2, 2, Complex64::new(-4., 0.));
    let a: CsMat<Complex64> = tri.to_csc();
    let pattern = SparsityPattern::from_csmat(a.view());
    let result = compute_coloring(
        &pattern,
        ColoringProblem::default(),
        GreedyColoringAlgorithm::new(Order::SmallestLast),
    )
    .unwrap();
    assert_eq!(result.coloring.ncolors(), 2);
    let b = result.compress(a.view()).unwrap();
    assert_eq!(result.decompress(b.view()).unwrap(), a);
}

#[test]
fn seeded_random_order_is_reproducible() {
    let mut rng = SmallRng::seed_from_u64(7);
    let a = random_matrix(&mut rng, (40, 40), 0.1);
    let pattern = SparsityPattern::from_csmat(a.view());
    let algo = GreedyColoringAlgorithm::new(Order::random(99));
    let first =
        compute_coloring(&pattern, ColoringProblem::default(), algo).unwrap();
    let second =
        compute_coloring(&pattern, ColoringProblem::default(), algo).unwrap();
    assert_eq!(first, second);
}

#[test]
fn reused_for_several_matrices() {
    let a = jacobian();
    let pattern = SparsityPattern::from_dense(a.view());
    let result = compute_coloring(
        &pattern,
        ColoringProblem::default(),
        GreedyColoringAlgorithm::default(),
    )
    .unwrap();
    for scale in 1..4 {
        let scaled = a.mapv(|v| v * scale);
        let b = compress_dense(scaled.view(), &result.basis).unwrap();
        let recovered = result.decompress(b.view()).unwrap();
        assert_eq!(recovered.to_dense(), scaled);
    }
}

#[test]
fn errors() {
    let rect = SparsityPattern::dense((3, 4));
    let problem = ColoringProblem::new(Structure::Symmetric, Partition::Row);
    assert!(matches!(
        compute_coloring(&rect, problem, GreedyColoringAlgorithm::default()),
        Err(ColoringError::InvalidShape { rows: 3, cols: 4, .. })
    ));

    assert_eq!(
        ColoringProblem::from_names("nonsymmetric", "columns"),
        Err(ColoringError::InvalidPartition("columns".to_owned()))
    );
    assert!(matches!(
        "largest".parse::<Order>(),
        Err(ColoringError::InvalidOrder(_))
    ));

    let a = jacobian();
    let pattern = SparsityPattern::from_dense(a.view());
    let result = compute_coloring(
        &pattern,
        ColoringProblem::default(),
        GreedyColoringAlgorithm::default(),
    )
    .unwrap();
    let wrong = Array2::<i64>::zeros((4, 5));
    assert!(matches!(
        compress_dense(wrong.view(), &result.basis),
        Err(ColoringError::ShapeMismatch { .. })
    ));
    let too_small = Array2::<i64>::zeros((4, 1));
    assert!(matches!(
        result.decompress(too_small.view()),
        Err(ColoringError::ShapeMismatch { .. })
    ));
}
