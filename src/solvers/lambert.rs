//! Three-dimensional universal-variable Lambert solver.
//!
//! Direct generalization of `lambert::solve_lambert`'s Stumpff-function
//! universal-variable approach from an implicit 2D orbital plane to an
//! explicit 3D one (transfer-plane sense taken from `r1 x r2`), replacing
//! the upstream bisection on `psi` with Newton's method on the same
//! universal parameter `z` (Curtis, *Orbital Mechanics for Engineering
//! Students*, Algorithm 5.2) and returning `feasible = false` with an
//! infinite delta-v instead of `None` when the iteration does not
//! converge.

use glam::DVec3;

const TOLERANCE: f64 = 1e-8;
const MAX_ITERATIONS: usize = 100;

fn stumpff_c(z: f64) -> f64 {
    if z > 1e-6 {
        (1.0 - z.sqrt().cos()) / z
    } else if z < -1e-6 {
        ((-z).sqrt().cosh() - 1.0) / (-z)
    } else {
        // Taylor series about z = 0.
        1.0 / 2.0 - z / 24.0 + z * z / 720.0
    }
}

fn stumpff_s(z: f64) -> f64 {
    if z > 1e-6 {
        let sz = z.sqrt();
        (sz - sz.sin()) / sz.powi(3)
    } else if z < -1e-6 {
        let sz = (-z).sqrt();
        (sz.sinh() - sz) / sz.powi(3)
    } else {
        1.0 / 6.0 - z / 120.0 + z * z / 5040.0
    }
}

/// Input to [`solve_lambert`]. `initial_velocity`/`target_velocity`, when
/// supplied, let the solver report the total impulsive delta-v of a
/// rendezvous that departs `r1` at `initial_velocity` and arrives at `r2`
/// matching `target_velocity`; without them `delta_v` reports the transfer
/// orbit's own departure+arrival speed only.
#[derive(Clone, Copy, Debug)]
pub struct LambertConfig {
    pub r1: DVec3,
    pub r2: DVec3,
    pub time_of_flight: f64,
    pub mu: f64,
    pub prograde: bool,
    pub initial_velocity: Option<DVec3>,
    pub target_velocity: Option<DVec3>,
}

impl LambertConfig {
    pub fn new(r1: DVec3, r2: DVec3, time_of_flight: f64, mu: f64, prograde: bool) -> Self {
        Self { r1, r2, time_of_flight, mu, prograde, initial_velocity: None, target_velocity: None }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct LambertSolution {
    pub feasible: bool,
    pub v1: DVec3,
    pub v2: DVec3,
    pub delta_v: f64,
    pub semi_major_axis: f64,
    /// Number of complete transfer-orbit revolutions between departure and
    /// arrival (0 for the direct zero-revolution branch).
    pub revolutions: u32,
}

impl LambertSolution {
    fn infeasible() -> Self {
        Self { feasible: false, v1: DVec3::ZERO, v2: DVec3::ZERO, delta_v: f64::INFINITY, semi_major_axis: f64::NAN, revolutions: 0 }
    }
}

/// Solve the zero-revolution Lambert problem: find the orbit connecting
/// `r1` to `r2` in exactly `time_of_flight` seconds.
pub fn solve_lambert(config: LambertConfig) -> LambertSolution {
    let r1n = config.r1.length();
    let r2n = config.r2.length();
    if r1n < 1e-9 || r2n < 1e-9 || config.time_of_flight <= 0.0 {
        return LambertSolution::infeasible();
    }

    let cross = config.r1.cross(config.r2);
    let cos_dtheta = (config.r1.dot(config.r2) / (r1n * r2n)).clamp(-1.0, 1.0);
    let mut dtheta = cos_dtheta.acos();

    let short_way_is_prograde = cross.z > 0.0;
    if config.prograde != short_way_is_prograde {
        dtheta = std::f64::consts::TAU - dtheta;
    }

    if dtheta.abs() < 1e-9 || (std::f64::consts::TAU - dtheta).abs() < 1e-9 {
        // Degenerate: departure and arrival are collinear with the origin.
        return LambertSolution::infeasible();
    }

    let a_param = dtheta.sin() * (r1n * r2n / (1.0 - cos_dtheta)).sqrt();
    if !a_param.is_finite() {
        return LambertSolution::infeasible();
    }

    let y = |z: f64, c: f64, s: f64| r1n + r2n + a_param * (z * s - 1.0) / c.sqrt();

    let mut z = 0.0_f64;
    for _ in 0..MAX_ITERATIONS {
        let c = stumpff_c(z);
        let s = stumpff_s(z);
        let mut y_val = y(z, c, s);

        // Bracket-recovery: A > 0 requires y(z) > 0 for a physical chi.
        let mut guard = 0;
        while a_param > 0.0 && y_val < 0.0 && guard < 50 {
            z += 0.1;
            y_val = y(z, stumpff_c(z), stumpff_s(z));
            guard += 1;
        }
        if y_val < 0.0 {
            return LambertSolution::infeasible();
        }

        let c = stumpff_c(z);
        let s = stumpff_s(z);
        let chi = (y_val / c).sqrt();
        let f_z = chi.powi(3) * s + a_param * y_val.sqrt() - config.mu.sqrt() * config.time_of_flight;

        let df_dz = if z.abs() > 1e-6 {
            chi.powi(3) * ((1.0 / (2.0 * z)) * (c - 3.0 * s / (2.0 * c)) + 3.0 * s * s / (4.0 * c))
                + (a_param / 8.0) * (3.0 * s / c * y_val.sqrt() + a_param * (c / y_val).sqrt())
        } else {
            let y0 = y_val;
            (2.0_f64.sqrt() / 40.0) * y0.powf(1.5) + (a_param / 8.0) * (y0.sqrt() + a_param * (1.0 / (2.0 * y0)).sqrt())
        };

        if df_dz.abs() < 1e-300 {
            return LambertSolution::infeasible();
        }

        let delta = f_z / df_dz;
        z -= delta;

        if delta.abs() < TOLERANCE {
            let c = stumpff_c(z);
            let s = stumpff_s(z);
            let y_final = y(z, c, s);
            if y_final < 0.0 {
                return LambertSolution::infeasible();
            }

            let f = 1.0 - y_final / r1n;
            let g = a_param * (y_final / config.mu).sqrt();
            let gdot = 1.0 - y_final / r2n;

            if g.abs() < 1e-300 {
                return LambertSolution::infeasible();
            }

            let v1 = (config.r2 - config.r1 * f) / g;
            let v2 = (config.r2 * gdot - config.r1) / g;

            let semi_major_axis = if z.abs() > 1e-12 { y_final / (c * z) } else { f64::INFINITY };

            let delta_v = match (config.initial_velocity, config.target_velocity) {
                (Some(v0), Some(vf)) => (v1 - v0).length() + (vf - v2).length(),
                _ => v1.length() + v2.length(),
            };

            return LambertSolution { feasible: true, v1, v2, delta_v, semi_major_axis, revolutions: 0 };
        }
    }

    LambertSolution::infeasible()
}

/// `y(z)` for a given Stumpff pair, shared between the zero-rev Newton
/// solver and the multi-rev bracketed search below.
fn y_of(r1n: f64, r2n: f64, a_param: f64, z: f64, c: f64, s: f64) -> f64 {
    r1n + r2n + a_param * (z * s - 1.0) / c.sqrt()
}

/// Time of flight implied by universal variable `z`, or `None` where the
/// Stumpff `C(z)` vanishes (the bracket edges at `z = (2*pi*k)^2`) or the
/// resulting `y(z)` is unphysical (negative).
fn tof_of_z(r1n: f64, r2n: f64, a_param: f64, mu: f64, z: f64) -> Option<f64> {
    let c = stumpff_c(z);
    let s = stumpff_s(z);
    if c <= 1e-12 {
        return None;
    }
    let y_val = y_of(r1n, r2n, a_param, z, c, s);
    if y_val < 0.0 {
        return None;
    }
    let chi = (y_val / c).sqrt();
    Some((chi.powi(3) * s + a_param * y_val.sqrt()) / mu.sqrt())
}

fn solution_from_z(config: &LambertConfig, r1n: f64, r2n: f64, a_param: f64, z: f64, revolutions: u32) -> Option<LambertSolution> {
    let c = stumpff_c(z);
    let s = stumpff_s(z);
    if c <= 1e-12 {
        return None;
    }
    let y_val = y_of(r1n, r2n, a_param, z, c, s);
    if y_val < 0.0 {
        return None;
    }

    let f = 1.0 - y_val / r1n;
    let g = a_param * (y_val / config.mu).sqrt();
    let gdot = 1.0 - y_val / r2n;
    if g.abs() < 1e-300 {
        return None;
    }

    let v1 = (config.r2 - config.r1 * f) / g;
    let v2 = (config.r2 * gdot - config.r1) / g;
    let semi_major_axis = y_val / (c * z);

    let delta_v = match (config.initial_velocity, config.target_velocity) {
        (Some(v0), Some(vf)) => (v1 - v0).length() + (vf - v2).length(),
        _ => v1.length() + v2.length(),
    };

    Some(LambertSolution { feasible: true, v1, v2, delta_v, semi_major_axis, revolutions })
}

/// Golden-section search for the `z` minimizing `tof_of_z` within
/// `(lo, hi)`, treating the `None` (infeasible) region as `+infinity`.
/// `tof_of_z` is unimodal on each multi-revolution bracket (it diverges at
/// both ends, per the universal-variable formulation), so this converges
/// to the single interior minimum.
fn minimize_tof(r1n: f64, r2n: f64, a_param: f64, mu: f64, lo: f64, hi: f64) -> f64 {
    let phi = (5.0_f64.sqrt() - 1.0) / 2.0;
    let mut a = lo;
    let mut b = hi;
    let eval = |z: f64| tof_of_z(r1n, r2n, a_param, mu, z).unwrap_or(f64::INFINITY);

    let mut c = b - phi * (b - a);
    let mut d = a + phi * (b - a);
    let mut fc = eval(c);
    let mut fd = eval(d);

    for _ in 0..200 {
        if (b - a).abs() < 1e-9 {
            break;
        }
        if fc < fd {
            b = d;
            d = c;
            fd = fc;
            c = b - phi * (b - a);
            fc = eval(c);
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + phi * (b - a);
            fd = eval(d);
        }
    }

    0.5 * (a + b)
}

/// Bisect `tof_of_z(z) - target` to zero within `(lo, hi)`, assuming the
/// endpoints bracket a sign change (monotone on each side of the bracket's
/// interior minimum, per [`minimize_tof`]'s precondition). Returns `None`
/// if the endpoints don't actually bracket a root.
fn bisect_tof(r1n: f64, r2n: f64, a_param: f64, mu: f64, target: f64, mut lo: f64, mut hi: f64) -> Option<f64> {
    let eval = |z: f64| tof_of_z(r1n, r2n, a_param, mu, z).unwrap_or(f64::INFINITY) - target;

    let mut f_lo = eval(lo);
    let f_hi = eval(hi);
    if f_lo.is_infinite() || f_lo.signum() == f_hi.signum() {
        return None;
    }

    for _ in 0..100 {
        let mid = 0.5 * (lo + hi);
        let f_mid = eval(mid);
        if f_mid.abs() < 1e-6 || (hi - lo).abs() < 1e-9 {
            return Some(mid);
        }
        if f_mid.signum() == f_lo.signum() {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }

    Some(0.5 * (lo + hi))
}

/// Enumerate zero- through `n_max`-revolution solutions, keeping the lower
/// and upper `z` branch for each revolution count. Multi-revolution
/// transfers admit up to two solutions per count (one on each side of the
/// minimum-time-of-flight `z` within that revolution's bracket); both are
/// returned, sorted by total delta-v, so a caller (e.g.
/// `solvers::maneuver`) can pick the cheapest.
///
/// For `N >= 1`, `z` is searched within `((2*pi*N)^2, (2*pi*(N+1))^2)` —
/// the universal-variable formulation's N-revolution bracket, where
/// `C(z)` vanishes at both ends and time-of-flight diverges, giving a
/// single interior minimum and (when `config.time_of_flight` is reachable
/// at all for that N) two roots straddling it.
pub fn solve_lambert_multi_rev(config: LambertConfig, n_max: u32) -> Vec<LambertSolution> {
    let mut solutions = vec![solve_lambert(config)];

    let r1n = config.r1.length();
    let r2n = config.r2.length();
    if r1n > 1e-9 && r2n > 1e-9 && config.time_of_flight > 0.0 {
        let cross = config.r1.cross(config.r2);
        let cos_dtheta = (config.r1.dot(config.r2) / (r1n * r2n)).clamp(-1.0, 1.0);
        let mut dtheta = cos_dtheta.acos();
        let short_way_is_prograde = cross.z > 0.0;
        if config.prograde != short_way_is_prograde {
            dtheta = std::f64::consts::TAU - dtheta;
        }

        let a_param = dtheta.sin() * (r1n * r2n / (1.0 - cos_dtheta)).sqrt();

        if a_param.is_finite() && a_param > 0.0 {
            for n in 1..=n_max {
                let tau = std::f64::consts::TAU;
                let lo = (tau * n as f64).powi(2) + 1e-6;
                let hi = (tau * (n + 1) as f64).powi(2) - 1e-6;

                let z_min = minimize_tof(r1n, r2n, a_param, config.mu, lo, hi);
                let tof_min = tof_of_z(r1n, r2n, a_param, config.mu, z_min);

                let Some(tof_min) = tof_min else { continue };
                if tof_min > config.time_of_flight {
                    continue;
                }

                if let Some(z_left) = bisect_tof(r1n, r2n, a_param, config.mu, config.time_of_flight, lo, z_min) {
                    if let Some(solution) = solution_from_z(&config, r1n, r2n, a_param, z_left, n) {
                        solutions.push(solution);
                    }
                }
                if let Some(z_right) = bisect_tof(r1n, r2n, a_param, config.mu, config.time_of_flight, z_min, hi) {
                    if let Some(solution) = solution_from_z(&config, r1n, r2n, a_param, z_right, n) {
                        solutions.push(solution);
                    }
                }
            }
        }
    }

    solutions.retain(|s| s.feasible);
    solutions.sort_by(|a, b| a.delta_v.partial_cmp(&b.delta_v).unwrap_or(std::cmp::Ordering::Equal));
    solutions
}
