use crate::features::NormalizedRow;

/// An ordered train/validation partition.
#[derive(Debug, Clone)]
pub struct TrainSplit {
    pub train: Vec<NormalizedRow>,
    pub validation: Vec<NormalizedRow>,
}

/// Splits normalized rows 80/20 on row order.
///
/// The cut index is `floor(0.8 * n)`; rows keep their ingestion order and no
/// shuffling happens, so the same input always produces the same partition.
/// Small corpora may leave either side empty; the trainer decides what that
/// means.
pub fn split(rows: Vec<NormalizedRow>) -> TrainSplit {
    let cut = (rows.len() as f64 * 0.8).floor() as usize;

    let mut train = rows;
    let validation = train.split_off(cut);

    TrainSplit { train, validation }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize) -> Vec<NormalizedRow> {
        (0..n)
            .map(|i| NormalizedRow {
                features: vec![i as f32],
                target: i as f32,
            })
            .collect()
    }

    #[test]
    fn sizes_follow_the_floor_law() {
        for n in 0..50 {
            let TrainSplit { train, validation } = split(rows(n));
            let cut = (n as f64 * 0.8).floor() as usize;

            assert_eq!(train.len(), cut);
            assert_eq!(validation.len(), n - cut);
        }
    }

    #[test]
    fn concatenation_reconstructs_the_input_order() {
        let input = rows(10);
        let TrainSplit { train, validation } = split(input.clone());

        let rebuilt: Vec<NormalizedRow> =
            train.into_iter().chain(validation).collect();
        assert_eq!(rebuilt, input);
    }

    #[test]
    fn single_row_lands_in_validation() {
        let TrainSplit { train, validation } = split(rows(1));

        assert!(train.is_empty());
        assert_eq!(validation.len(), 1);
    }
}
