/// Trapezoidal rule estimate of the integral of `f` over
/// `[left, right]`, using `traps` trapezoids of width `base_len`.
///
/// Endpoints are weighted 1/2, the `traps - 1` interior points weigh 1,
/// and the sum is scaled by `base_len`. Evaluates `f` at `traps + 1`
/// points. Pure: identical arguments give an identical result.
///
/// An empty panel (`traps == 0`) contributes nothing.
pub fn trap(left: f64, right: f64, traps: i32, base_len: f64, f: impl Fn(f64) -> f64) -> f64 {
    if traps <= 0 {
        return 0.0;
    }

    let mut estimate = (f(left) + f(right)) / 2.0;
    for i in 1..traps {
        // interior points from left by multiplication, as the edges are
        let x = left + i as f64 * base_len;
        estimate += f(x);
    }
    estimate * base_len
}
