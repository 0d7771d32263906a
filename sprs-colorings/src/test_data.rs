//! Some matrices used in tests

use ndarray::{arr2, Array2};
use sprs::{CsMat, TriMat};

/// | 0 2 3 0 |
/// | 0 0 0 4 |
/// | 1 5 0 0 |
/// | 0 6 7 0 |
pub fn jac_4x4() -> CsMat<f64> {
    let indptr = vec![0, 1, 4, 6, 7];
    let indices = vec![2, 0, 2, 3, 0, 3, 1];
    let data = vec![1., 2., 5., 6., 3., 7., 4.];
    CsMat::new_csc((4, 4), indptr, indices, data)
}

pub fn jac_4x4_dense() -> Array2<f64> {
    arr2(&[
        [0., 2., 3., 0.],
        [0., 0., 0., 4.],
        [1., 5., 0., 0.],
        [0., 6., 7., 0.],
    ])
}

/// Diagonal `0..10`, then first row and first column set to `10..20`.
///
/// The adjacency graph is a star centered at vertex 0.
pub fn arrow_10() -> CsMat<f64> {
    let mut tri = TriMat::new((10, 10));
    tri.add_triplet(0, 0, 10.);
    for i in 1..10 {
        tri.add_triplet(i, i, i as f64);
        tri.add_triplet(i, 0, 10. + i as f64);
        tri.add_triplet(0, i, 10. + i as f64);
    }
    tri.to_csc()
}
