//! Closed-form steady-state measures.

use log::debug;

use crate::{ModelError, ModelParams, ModelResult, QueueModel, QueueingModelResult};

/// Evaluate `model` at `params`.
///
/// Fails with [`ModelError::InvalidParameter`] on a non-positive rate, a
/// missing or zero server count for the `c` variants, or a missing or
/// negative σ / cₐ where the variant needs one.  Fails with
/// [`ModelError::UnstableSystem`] when ρ ≥ 1.
pub fn queueing_model(model: QueueModel, params: &ModelParams) -> ModelResult<QueueingModelResult> {
    let lambda = positive("arrival_rate", params.arrival_rate)?;
    let mu = positive("service_rate", params.service_rate)?;

    let c = if model.is_multi_server() {
        match params.servers {
            Some(c) if c >= 1 => c,
            Some(c) => {
                return Err(ModelError::InvalidParameter(format!(
                    "{model} needs at least one server, got {c}"
                )));
            }
            None => {
                return Err(ModelError::InvalidParameter(format!("{model} needs a server count")));
            }
        }
    } else {
        1
    };
    let sigma = if model.needs_service_std_dev() {
        non_negative(model, "service_std_dev", params.service_std_dev)?
    } else {
        0.0
    };
    let ca = if model.needs_arrival_cv() {
        non_negative(model, "arrival_cv", params.arrival_cv)?
    } else {
        0.0
    };

    let a = lambda / mu;
    let rho = a / f64::from(c);
    if rho >= 1.0 {
        debug!("{model}: λ={lambda} μ={mu} c={c} is unstable (ρ={rho})");
        return Err(ModelError::UnstableSystem { rho });
    }

    let n = params.n;
    let (p0, lq, pn) = match model {
        QueueModel::MM1 => (1.0 - rho, rho * rho / (1.0 - rho), single_pn(rho, n)),
        QueueModel::MG1 => {
            let lq = (lambda * lambda * sigma * sigma + rho * rho) / (2.0 * (1.0 - rho));
            (1.0 - rho, lq, single_pn(rho, n))
        }
        QueueModel::MMc => {
            let e = Erlang::new(a, c);
            (e.p0, e.lq, e.pn(n))
        }
        QueueModel::MGc => {
            let e = Erlang::new(a, c);
            let cs2 = sigma * sigma * mu * mu;
            (e.p0, e.lq * (cs2 + 1.0) / 2.0, e.pn(n))
        }
        QueueModel::GGc => {
            let e = Erlang::new(a, c);
            let cs2 = sigma * sigma * mu * mu;
            let lq = a * a * (ca * ca + cs2) / (2.0 * (1.0 - rho)) * e.lq;
            (e.p0, lq, e.pn(n))
        }
    };

    let wq = lq / lambda;
    let result = QueueingModelResult {
        model,
        rho,
        p0,
        lq,
        ls: lq + a,
        wq,
        ws: wq + 1.0 / mu,
        n,
        pn,
    };
    debug!("{model}: ρ={rho:.4} P0={p0:.4} Lq={lq:.4} Wq={wq:.4}");
    Ok(result)
}

fn positive(name: &str, value: f64) -> ModelResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ModelError::InvalidParameter(format!(
            "{name} must be a positive finite number, got {value}"
        )))
    }
}

fn non_negative(model: QueueModel, name: &str, value: Option<f64>) -> ModelResult<f64> {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => Ok(v),
        Some(v) => Err(ModelError::InvalidParameter(format!(
            "{name} must be a non-negative finite number, got {v}"
        ))),
        None => Err(ModelError::InvalidParameter(format!("{model} needs {name}"))),
    }
}

/// `(1 − ρ)ρⁿ`.
#[inline]
fn single_pn(rho: f64, n: u32) -> f64 {
    (1.0 - rho) * rho.powf(f64::from(n))
}

// ── Erlang-C terms ────────────────────────────────────────────────────────────

/// M/M/c quantities for offered load `a = λ/μ` on `c` servers.
///
/// Terms `aᵏ/k!` are carried as logarithms and the P₀ normaliser is summed
/// relative to its largest term, so large loads neither overflow nor
/// produce NaN.  P₀ itself may underflow to 0.
struct Erlang {
    ln_a:      f64,
    c:         u32,
    ln_rho:    f64,
    /// `ln(aᶜ/c!)`
    ln_term_c: f64,
    ln_p0:     f64,
    p0:        f64,
    lq:        f64,
}

impl Erlang {
    /// Requires `0 < a < c`.
    fn new(a: f64, c: u32) -> Self {
        let rho = a / f64::from(c);
        let ln_a = a.ln();
        let ln_tail_factor = -(1.0 - rho).ln();

        // First pass: ln(aᶜ/c!) and the largest log term.
        let mut ln_term = 0.0_f64;
        let mut ln_max = 0.0_f64;
        for k in 1..=c {
            ln_term += ln_a - f64::from(k).ln();
            if k < c {
                ln_max = ln_max.max(ln_term);
            }
        }
        let ln_term_c = ln_term;
        let ln_tail = ln_term_c + ln_tail_factor;
        ln_max = ln_max.max(ln_tail);

        // Second pass: Σ_{k<c} aᵏ/k! + aᶜ/(c!(1−ρ)), scaled by e^(−ln_max).
        let mut scaled = (ln_tail - ln_max).exp();
        let mut ln_term = 0.0_f64;
        for k in 0..c {
            if k > 0 {
                ln_term += ln_a - f64::from(k).ln();
            }
            scaled += (ln_term - ln_max).exp();
        }
        let ln_p0 = -(ln_max + scaled.ln());

        // P₀aᶜ/c! is a share of the normaliser, so it stays within [0, 1].
        let share_c = (ln_p0 + ln_term_c).exp();
        let lq = share_c * rho / ((1.0 - rho) * (1.0 - rho));

        Self {
            ln_a,
            c,
            ln_rho: rho.ln(),
            ln_term_c,
            ln_p0,
            p0: ln_p0.exp(),
            lq,
        }
    }

    /// `P₀aⁿ/n!` below `c`, `P₀aⁿ/(c!·c^(n−c))` from `c` up.
    fn pn(&self, n: u32) -> f64 {
        let ln_term = if n < self.c {
            (1..=n).map(|k| self.ln_a - f64::from(k).ln()).sum::<f64>()
        } else {
            self.ln_term_c + f64::from(n - self.c) * self.ln_rho
        };
        (self.ln_p0 + ln_term).exp()
    }
}
