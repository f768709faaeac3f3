use crate::core::Value;
use crate::core::attributes::{AttributeRef, NominalAttribute, NumericAttribute};
use crate::core::slice_header::SliceHeader;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Two fields: `g` (nominal) and `v` (numeric).
pub fn header_group_value() -> Arc<SliceHeader> {
    Arc::new(SliceHeader::new(
        "group_value".into(),
        vec![
            Arc::new(NominalAttribute::new("g".into())) as AttributeRef,
            Arc::new(NumericAttribute::new("v".into())) as AttributeRef,
        ],
    ))
}

/// `g` (nominal), `v` (numeric), `status` (`active` / `idle`), `user` (nominal).
pub fn header_sales() -> Arc<SliceHeader> {
    Arc::new(SliceHeader::new(
        "sales".into(),
        vec![
            Arc::new(NominalAttribute::new("g".into())) as AttributeRef,
            Arc::new(NumericAttribute::new("v".into())) as AttributeRef,
            Arc::new(NominalAttribute::with_values(
                "status".into(),
                vec!["active".into(), "idle".into()],
            )) as AttributeRef,
            Arc::new(NominalAttribute::new("user".into())) as AttributeRef,
        ],
    ))
}

pub fn sales_row(g: &str, v: Option<f64>, status: &str, user: &str) -> Vec<Value> {
    vec![
        Value::from(g),
        Value::from(v),
        Value::from(status),
        Value::from(user),
    ]
}

/// The six-row dataset `[(a,10), (a,20), (b,5), (b,15), (a,30), (b,25)]`
/// for [`header_group_value`].
pub fn scenario_rows() -> Vec<Vec<Value>> {
    [("a", 10.0), ("a", 20.0), ("b", 5.0), ("b", 15.0), ("a", 30.0), ("b", 25.0)]
        .into_iter()
        .map(|(g, v)| vec![Value::from(g), Value::from(v)])
        .collect()
}

/// Seeded random rows for [`header_sales`]: five groups, roughly 10% of `v`
/// missing, a 60/40 `active`/`idle` split and 200 possible users.
pub fn synthetic_sales(n: usize, seed: u64) -> Vec<Vec<Value>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let g = ["a", "b", "c", "d", "e"][rng.random_range(0..5)];
            let v = if rng.random_bool(0.1) {
                None
            } else {
                Some(rng.random_range(0.0..100.0))
            };
            let status = if rng.random_bool(0.6) { "active" } else { "idle" };
            let user = format!("u{}", rng.random_range(0..200));
            sales_row(g, v, status, &user)
        })
        .collect()
}
