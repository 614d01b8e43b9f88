//! Summary statistics over scaled pressures.

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Most frequent value that occurs at least twice. Ties go to the value seen
/// first. `None` when every value is distinct.
pub fn mode(values: &[f64]) -> Option<f64> {
    let mut counts: Vec<(f64, usize)> = Vec::new();
    for &v in values {
        match counts.iter_mut().find(|(seen, _)| *seen == v) {
            Some((_, n)) => *n += 1,
            None => counts.push((v, 1)),
        }
    }

    let mut best: Option<(f64, usize)> = None;
    for (v, n) in counts {
        if n >= 2 && best.is_none_or(|(_, best_n)| n > best_n) {
            best = Some((v, n));
        }
    }
    best.map(|(v, _)| v)
}
