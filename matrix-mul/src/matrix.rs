use super::NumberType;

/// Number of rows in the band each process receives, if the rows split evenly.
///
/// * `n`: Dimension of the square matrix.
/// * `n_proc`: Number of cooperating processes.
pub(crate) fn band_rows(n: usize, n_proc: usize) -> Option<usize> {
    if n_proc == 0 || n % n_proc != 0 {
        return None;
    }

    Some(n / n_proc)
}

/// Builds an n x n matrix in row-major order from a value function.
///
/// * `n`: Dimension of the matrix.
/// * `value`: Maps a (row, column) index pair to the element value.
pub(crate) fn generate(n: usize, value: impl Fn(usize, usize) -> NumberType) -> Vec<NumberType> {
    let mut result = vec![0f64; n * n];
    for i in 0..n {
        for j in 0..n {
            result[i * n + j] = value(i, j);
        }
    }

    result
}

/// Multiplies a band of A's rows with the full B, accumulating into the
/// same-shaped band of C. The i-k-j loop order keeps the inner loop on
/// contiguous rows of B.
///
/// * `local_a`: Contiguous rows of A, `rows * n` elements.
/// * `b`: The full matrix B.
/// * `n`: Dimension of the square matrices.
/// * `local_c`: Zero-initialized output band, same shape as `local_a`.
pub(crate) fn multiply_band(
    local_a: &[NumberType],
    b: &[NumberType],
    n: usize,
    local_c: &mut [NumberType],
) {
    assert_eq!(local_a.len(), local_c.len());
    let rows = local_a.len() / n;

    for i in 0..rows {
        for k in 0..n {
            let a_ik = local_a[i * n + k];
            for j in 0..n {
                local_c[i * n + j] += a_ik * b[k * n + j];
            }
        }
    }
}

/// Performs the whole multiplication in one go.
pub(crate) fn multiply(a: &[NumberType], b: &[NumberType], n: usize) -> Vec<NumberType> {
    let mut result = vec![0f64; n * n];
    multiply_band(a, b, n, &mut result);

    result
}

/// Sum of all elements, rounded to the nearest integer.
pub(crate) fn checksum(c: &[NumberType]) -> i64 {
    c.iter().sum::<NumberType>().round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{thread_rng, Rng};

    fn generate_random(n: usize) -> Vec<NumberType> {
        let mut result = vec![0f64; n * n];
        thread_rng().fill(&mut result[..]);

        result
    }

    /// Splits `a` into even bands, multiplies each band on its own and
    /// reassembles the bands in order, like the distributed run does.
    fn multiply_banded(
        a: &[NumberType],
        b: &[NumberType],
        n: usize,
        n_proc: usize,
    ) -> Vec<NumberType> {
        let band_elems = band_rows(n, n_proc).unwrap() * n;
        let mut gathered = vec![0f64; n * n];

        for (r, band) in a.chunks(band_elems).enumerate() {
            let mut local_c = vec![0f64; band_elems];
            multiply_band(band, b, n, &mut local_c);
            gathered[r * band_elems..(r + 1) * band_elems].copy_from_slice(&local_c);
        }

        gathered
    }

    #[test]
    fn band_rows_requires_even_split() {
        assert_eq!(band_rows(4, 2), Some(2));
        assert_eq!(band_rows(4, 4), Some(1));
        assert_eq!(band_rows(4, 1), Some(4));
        assert_eq!(band_rows(5, 2), None);
        assert_eq!(band_rows(256, 3), None);
        assert_eq!(band_rows(4, 0), None);
    }

    #[test]
    fn generator_formulas() {
        let a = generate(3, |i, j| (i + j) as NumberType);
        assert_eq!(a[0], 0.0);
        assert_eq!(a[1 * 3 + 2], 3.0);
        assert_eq!(a[2 * 3 + 2], 4.0);

        let b = generate(3, |i, j| i as NumberType - j as NumberType);
        assert_eq!(b[0 * 3 + 2], -2.0);
        assert_eq!(b[2 * 3 + 0], 2.0);
        assert_eq!(b[1 * 3 + 1], 0.0);
    }

    #[test]
    fn two_bands_match_the_direct_product() {
        let n = 4;
        let a = generate(n, |i, j| (i + j) as NumberType);
        let b = generate(n, |i, j| i as NumberType - j as NumberType);

        let reference = multiply(&a, &b, n);
        let gathered = multiply_banded(&a, &b, n, 2);

        // band 0 carries rows 0-1, band 1 carries rows 2-3
        assert_eq!(gathered, reference);
    }

    #[test]
    fn random_bands_match_the_direct_product() {
        let n = 6;
        let a = generate_random(n);
        let b = generate_random(n);
        let reference = multiply(&a, &b, n);

        // every even split reassembles the same product, one process included
        for n_proc in [1, 2, 3, 6] {
            assert_eq!(multiply_banded(&a, &b, n, n_proc), reference);
        }
    }

    #[test]
    fn checksum_rounds_to_nearest() {
        // A = [[0, 1], [1, 2]], B = [[0, -1], [1, 0]] => C = [[1, 0], [2, -1]]
        let a = generate(2, |i, j| (i + j) as NumberType);
        let b = generate(2, |i, j| i as NumberType - j as NumberType);
        let c = multiply(&a, &b, 2);

        assert_eq!(c, vec![1.0, 0.0, 2.0, -1.0]);
        assert_eq!(checksum(&c), 2);

        assert_eq!(checksum(&[0.3, 0.3]), 1);
        assert_eq!(checksum(&[-0.3, -0.3]), -1);
    }

    #[test]
    fn checksum_is_deterministic() {
        let n = 8;
        let a = generate(n, |i, j| (i + j) as NumberType);
        let b = generate(n, |i, j| i as NumberType - j as NumberType);

        let first = checksum(&multiply(&a, &b, n));
        let second = checksum(&multiply(&a, &b, n));

        assert_eq!(first, second);
    }
}
