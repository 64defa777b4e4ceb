use crate::dataset::DatasetView;
use crate::discovery::Algorithm;
use crate::error::Result;
use crate::model::Attribute;

/// Decide whether `determinant ->> dependent` holds on `view`.
///
/// Rows are split into classes of equal determinant values; the dependency
/// holds iff every class shows exactly the same distinct dependent tuples as
/// the whole view. An empty determinant is answered by the policy without
/// looking at the data.
pub fn multidetermines(
    view: &DatasetView,
    determinant: &[Attribute],
    dependent: &[Attribute],
    policy: Algorithm,
) -> Result<bool> {
    if determinant.is_empty() {
        return Ok(policy.holds_for_empty_determinant());
    }

    let global = view.distinct_tuples(dependent)?;
    for class in view.partition(determinant)? {
        let local = view.distinct_tuples_in(dependent, &class)?;
        // A class projection is always a subset of the global one.
        if local.len() != global.len() {
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attributes;
    use polars::prelude::*;

    fn view(df: DataFrame) -> DatasetView {
        DatasetView::from_frame(&df).unwrap()
    }

    #[test]
    fn test_independent_product_holds() {
        let v = view(
            df!(
                "A" => &[1, 1, 1, 1],
                "B" => &[1, 1, 2, 2],
                "C" => &["x", "y", "x", "y"]
            )
            .unwrap(),
        );
        assert!(multidetermines(&v, &attributes(["A"]), &attributes(["B"]), Algorithm::TopDown).unwrap());
        assert!(multidetermines(&v, &attributes(["B"]), &attributes(["C"]), Algorithm::BottomUp).unwrap());
    }

    #[test]
    fn test_missing_combination_fails() {
        // B=2 never sees C=y.
        let v = view(
            df!(
                "B" => &[1, 1, 2],
                "C" => &["x", "y", "x"]
            )
            .unwrap(),
        );
        assert!(!multidetermines(&v, &attributes(["B"]), &attributes(["C"]), Algorithm::TopDown).unwrap());
    }

    #[test]
    fn test_empty_determinant_depends_on_policy() {
        let v = view(df!("A" => &[1, 2]).unwrap());
        assert!(multidetermines(&v, &[], &attributes(["A"]), Algorithm::TopDown).unwrap());
        assert!(!multidetermines(&v, &[], &attributes(["A"]), Algorithm::BottomUp).unwrap());
    }

    #[test]
    fn test_matches_set_definition_on_random_relations() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..50 {
            let rows = rng.usize(1..20);
            let a: Vec<i64> = (0..rows).map(|_| rng.i64(0..3)).collect();
            let b: Vec<i64> = (0..rows).map(|_| rng.i64(0..3)).collect();
            let c: Vec<i64> = (0..rows).map(|_| rng.i64(0..2)).collect();
            let df = DataFrame::new(vec![
                Series::new("A", a.clone()),
                Series::new("B", b.clone()),
                Series::new("C", c.clone()),
            ])
            .unwrap();
            let v = view(df);

            let global: std::collections::HashSet<(i64, i64)> =
                (0..rows).map(|i| (b[i], c[i])).collect();
            let expected = a.iter().all(|&x| {
                let local: std::collections::HashSet<(i64, i64)> = (0..rows)
                    .filter(|&i| a[i] == x)
                    .map(|i| (b[i], c[i]))
                    .collect();
                local == global
            });

            let actual =
                multidetermines(&v, &attributes(["A"]), &attributes(["B", "C"]), Algorithm::TopDown)
                    .unwrap();
            assert_eq!(actual, expected);
        }
    }
}
