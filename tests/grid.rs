//! Integration tests on a full cross-product grid
//!
//! Rows are every `(a, b, c)` with `a ∈ 1..=4`, `b ∈ 2..=5`, `c ∈ 10..=15`,
//! in lexicographic order, grouped on `(a, b)`: 16 groups of 6 rows each.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use lexmap::{
    kernel, named, GroupViews, LexError, LexicographicIndex, MapOptions, ProgressCounter,
    RecordShape, Tensor, Vec64, MAX_ARITY,
};

struct Grid {
    a: Vec<i64>,
    b: Vec<i64>,
    c: Vec<i64>,
    index: LexicographicIndex,
}

fn grid() -> Grid {
    let (mut a, mut b, mut c) = (Vec::new(), Vec::new(), Vec::new());
    for x in 1..=4 {
        for y in 2..=5 {
            for z in 10..=15 {
                a.push(x);
                b.push(y);
                c.push(z);
            }
        }
    }
    let index = LexicographicIndex::from_named(&[named("a", a.clone()), named("b", b.clone())])
        .unwrap();
    Grid { a, b, c, index }
}

fn sum_all(b: &[i64], c: &[i64]) -> i64 {
    b.iter().sum::<i64>() + c.iter().sum::<i64>()
}

#[test]
fn test_index_correctly_constructed() {
    let g = grid();
    assert_eq!(g.index.len(), 16);
    assert_eq!(g.index.n_rows(), 96);
    assert!(g.index.group_sizes().iter().all(|&s| s == 6));

    let offsets = g.index.offsets();
    assert_eq!(offsets[0], 0);
    assert_eq!(offsets[16], 96);
    assert!(lexmap::is_strictly_increasing(offsets));
    assert_eq!(g.index.unique_row_indices().len(), 16);
}

#[test]
fn test_grid_is_lexicographically_sorted() {
    let g = grid();
    let checked = LexicographicIndex::build_checked(&[&g.a, &g.b]).unwrap();
    assert_eq!(checked, g.index);
}

#[test]
fn test_arity_violation() {
    let g = grid();
    let total = kernel::variadic(0, |v: &GroupViews<'_, i64>| v.present().flatten().sum::<i64>());
    let columns: Vec<&[i64]> = vec![g.c.as_slice(); MAX_ARITY + 1];
    let err = g.index.map_kernel(&total, &columns).unwrap_err();
    assert_eq!(err, LexError::ArityExceeded { max: MAX_ARITY, found: MAX_ARITY + 1 });
}

#[test]
fn test_trailing_arguments_required() {
    let g = grid();
    let no_trailing = kernel::fixed(2, |v: &GroupViews<'_, i64>| {
        sum_all(v.get(0).unwrap_or(&[]), v.get(1).unwrap_or(&[]))
    });
    let err = g
        .index
        .map_kernel(&no_trailing, &[g.a.as_slice(), g.b.as_slice()])
        .unwrap_err();
    assert!(matches!(err, LexError::SignatureMismatch { .. }));
}

#[test]
fn test_equivalent_argument_representations() {
    let g = grid();
    let raw = g.index.map((&g.b, &g.c), |(b, c)| sum_all(b, c)).unwrap();

    let (nb, nc) = (named("b", g.b.clone()), named("c", g.c.clone()));
    let by_name = g.index.map((&nb, &nc), |(b, c)| sum_all(b, c)).unwrap();

    let (vb, vc) = (Vec64::from_slice(&g.b), Vec64::from_slice(&g.c));
    let by_vec64 = g.index.map((&vb, &vc), |(b, c)| sum_all(b, c)).unwrap();

    assert_eq!(raw, by_name);
    assert_eq!(raw, by_vec64);
}

#[test]
fn test_map_matches_conventional_grouping() {
    let g = grid();
    let mapped = g.index.map((&g.b, &g.c), |(b, c)| sum_all(b, c)).unwrap();

    let mut reference: BTreeMap<(i64, i64), i64> = BTreeMap::new();
    for i in 0..g.a.len() {
        *reference.entry((g.a[i], g.b[i])).or_default() += g.b[i] + g.c[i];
    }
    let expected: Vec<i64> = reference.into_values().collect();
    assert_eq!(mapped.as_slice(), expected.as_slice());
}

#[test]
fn test_kernel_and_typed_modes_agree() {
    let g = grid();
    let typed = g.index.map((&g.b, &g.c), |(b, c)| sum_all(b, c)).unwrap();

    let trailing = kernel::variadic(2, |v: &GroupViews<'_, i64>| {
        sum_all(v.get(0).unwrap_or(&[]), v.get(1).unwrap_or(&[]))
    });
    let erased = g
        .index
        .map_kernel(&trailing, &[g.b.as_slice(), g.c.as_slice()])
        .unwrap();
    assert_eq!(typed, erased);
}

#[test]
fn test_tensor_records() {
    let g = grid();
    let out = g
        .index
        .map((&g.b, &g.c), |(_, _)| Tensor::<i32>::zeros(vec![10, 20]))
        .unwrap();
    assert_eq!(out.shape(), &[16, 10, 20]);
    assert!(out.as_slice().iter().all(|&v| v == 0));
}

#[test]
fn test_vector_records() {
    let g = grid();
    let out = g
        .index
        .map((&g.c,), |(c,)| [c[0], c[c.len() - 1], c.len() as i64])
        .unwrap();
    assert_eq!(out.shape(), &[16, 3]);
    for rec in out.records() {
        assert_eq!(rec, &[10, 15, 6]);
    }
}

#[test]
fn test_first_record_matches_out_of_band_evaluation() {
    let g = grid();
    let out = g.index.map((&g.b, &g.c), |(b, c)| sum_all(b, c)).unwrap();
    let rows = g.index.group(0);
    assert_eq!(out.record(0), &[sum_all(&g.b[rows.clone()], &g.c[rows])]);
}

#[test]
fn test_progress_and_dedicated_pool() {
    let g = grid();
    let counter = ProgressCounter::new(g.index.len() as u64);
    let opts = MapOptions::new().progress(&counter).num_threads(3);
    let pooled = g.index.map_with((&g.b, &g.c), &opts, |(b, c)| sum_all(b, c)).unwrap();
    assert_eq!(counter.count(), 16);

    let described = MapOptions::new().desc("grid sums").num_threads(1);
    let single = g.index.map_with((&g.b, &g.c), &described, |(b, c)| sum_all(b, c)).unwrap();
    assert_eq!(pooled, single);
}

#[test]
fn test_map_into_caller_output() {
    let g = grid();
    let mut out = Tensor::<f64>::zeros(vec![16, 2]);
    g.index
        .map_into((&g.c,), &mut out, &MapOptions::default(), |(c,)| {
            let mean = c.iter().sum::<i64>() as f64 / c.len() as f64;
            [mean, c.len() as f64]
        })
        .unwrap();
    assert!(out.records().all(|r| r == [12.5, 6.0]));
}

#[test]
fn test_optional_argument_absent() {
    let g = grid();
    let weights: Option<&Vec<i64>> = None;
    let out = g
        .index
        .map((&g.c, weights), |(c, w)| match w {
            Some(w) => c.iter().zip(w).map(|(x, y)| x * y).sum::<i64>(),
            None => c.iter().sum::<i64>(),
        })
        .unwrap();
    assert!(out.as_slice().iter().all(|&s| s == 75));
}

#[test]
fn test_general_map_stores_own_results() {
    let g = grid();
    let results: Vec<AtomicI64> = (0..g.index.len()).map(|_| AtomicI64::new(0)).collect();
    g.index.general_map(|i, offsets| {
        let rows = offsets[i]..offsets[i + 1];
        results[i].store(sum_all(&g.b[rows.clone()], &g.c[rows]), Ordering::Relaxed);
    });
    let typed = g.index.map((&g.b, &g.c), |(b, c)| sum_all(b, c)).unwrap();
    let stored: Vec<i64> = results.iter().map(|r| r.load(Ordering::Relaxed)).collect();
    assert_eq!(stored.as_slice(), typed.as_slice());
}

#[test]
fn test_inconsistent_record_shapes_fail() {
    let g = grid();
    let err = g
        .index
        .map((&g.b,), |(b,)| if b[0] == 2 { vec![0i64; 2] } else { vec![0i64; 3] })
        .unwrap_err();
    match err {
        LexError::ShapeMismatch { expected, found, .. } => {
            assert_eq!(expected, RecordShape::Vector(2));
            assert_eq!(found, RecordShape::Vector(3));
        }
        other => panic!("unexpected error: {other}"),
    }
}
