//! Regression test parameters and operations

use rastermorph_core::Surface;

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index, and success status.
pub struct RegParams {
    /// Name of the test (e.g., "graymorph")
    pub test_name: String,
    /// Current test index (incremented before each comparison)
    index: usize,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// # Arguments
    ///
    /// * `test_name` - Name of the test (e.g., "graymorph")
    pub fn new(test_name: &str) -> Self {
        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");

        Self {
            test_name: test_name.to_string(),
            index: 0,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.fail(msg);
            false
        } else {
            true
        }
    }

    /// Compare two surfaces for exact equality
    ///
    /// Width, height, format and every sample of every channel must match.
    /// Stride padding is not compared.
    ///
    /// # Returns
    ///
    /// `true` if the surfaces are identical, `false` otherwise.
    pub fn compare_surfaces(&mut self, expected: &dyn Surface, actual: &dyn Surface) -> bool {
        self.index += 1;

        let e = expected.layout();
        let a = actual.layout();
        if !e.same_size(&a) || e.format() != a.format() {
            let msg = format!(
                "Failure in {}_reg: surface comparison for index {} - \
                 layout mismatch: {}x{} {:?} vs {}x{} {:?}",
                self.test_name,
                self.index,
                e.width(),
                e.height(),
                e.format(),
                a.width(),
                a.height(),
                a.format()
            );
            self.fail(msg);
            return false;
        }

        let channels = e.format().channels();
        for y in 0..e.height() {
            if expected.row(y) == actual.row(y) {
                continue;
            }
            for x in 0..e.width() {
                for c in 0..channels {
                    let s1 = expected.sample(x, y, c);
                    let s2 = actual.sample(x, y, c);
                    if s1 != s2 {
                        let msg = format!(
                            "Failure in {}_reg: surface comparison for index {} - \
                             sample mismatch at ({}, {}) channel {}: expected {:?}, got {:?}",
                            self.test_name, self.index, x, y, c, s1, s2
                        );
                        self.fail(msg);
                        return false;
                    }
                }
            }
        }

        true
    }

    /// Compare two byte arrays
    ///
    /// # Returns
    ///
    /// `true` if data is identical, `false` otherwise.
    pub fn compare_bytes(&mut self, data1: &[u8], data2: &[u8]) -> bool {
        self.index += 1;

        if data1 != data2 {
            let msg = format!(
                "Failure in {}_reg: byte comparison for index {}\n\
                 sizes: {} vs {}",
                self.test_name,
                self.index,
                data1.len(),
                data2.len()
            );
            self.fail(msg);
            false
        } else {
            true
        }
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all tests passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rastermorph_core::{BitmapMut, PixelFormat, SurfaceMut};

    #[test]
    fn test_compare_values_success() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.0, 0.0));
        assert!(rp.is_success());
    }

    #[test]
    fn test_compare_values_within_delta() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
    }

    #[test]
    fn test_compare_values_failure() {
        let mut rp = RegParams::new("test");
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert_eq!(rp.failures().len(), 1);
    }

    #[test]
    fn test_compare_surfaces() {
        let mut rp = RegParams::new("test");
        let a = BitmapMut::new(4, 4, PixelFormat::Rgb24).unwrap();
        let mut b = BitmapMut::new(4, 4, PixelFormat::Rgb24).unwrap();
        assert!(rp.compare_surfaces(&a, &b));

        b.set_sample(3, 3, 2, 1).unwrap();
        assert!(!rp.compare_surfaces(&a, &b));
        assert!(rp.failures()[0].contains("(3, 3) channel 2"));
        assert_eq!(rp.index(), 2);
    }

    #[test]
    fn test_compare_surfaces_layout() {
        let mut rp = RegParams::new("test");
        let a = BitmapMut::new(4, 4, PixelFormat::Gray8).unwrap();
        let b = BitmapMut::new(4, 4, PixelFormat::Gray16).unwrap();
        assert!(!rp.compare_surfaces(&a, &b));
    }
}
