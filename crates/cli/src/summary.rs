//! JSON summaries of a single path: its strip, spine, and constraints.

use anyhow::{bail, Context, Result};
use billiards::api::{
    canonicalize_edge_path, counts_for_edge_path, Apex, EdgePath, Offset, PathGeometryField,
    PathStudy, Polynomial, StudyCfg,
};
use billiards::BigRational;
use serde::Serialize;
use std::str::FromStr;

/// Apex given on the command line as `X,Y`.
///
/// Coordinates written as integers or fractions (`1/3,1/2`) stay exact;
/// anything else (`0.33,0.5`) is read as floating point.
#[derive(Clone, Debug, PartialEq)]
pub enum ApexArg {
    Exact(Apex<BigRational>),
    Float(Apex<f64>),
}

impl FromStr for ApexArg {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let Some((x, y)) = s.split_once(',') else {
            bail!("apex must be X,Y, got {s:?}");
        };
        let (x, y) = (x.trim(), y.trim());
        if let (Ok(x), Ok(y)) = (x.parse::<BigRational>(), y.parse::<BigRational>()) {
            return Ok(ApexArg::Exact(Apex::new(x, y)));
        }
        let x: f64 = x.parse().with_context(|| format!("apex x {x:?}"))?;
        let y: f64 = y.parse().with_context(|| format!("apex y {y:?}"))?;
        Ok(ApexArg::Float(Apex::new(x, y)))
    }
}

impl ApexArg {
    pub fn as_float(&self) -> Apex<f64> {
        match self {
            ApexArg::Float(apex) => apex.clone(),
            ApexArg::Exact(apex) => Apex::new(ratio_to_f64(&apex.x), ratio_to_f64(&apex.y)),
        }
    }
}

fn ratio_to_f64(r: &BigRational) -> f64 {
    use num_traits::ToPrimitive;
    r.to_f64().unwrap_or(f64::NAN)
}

#[derive(Debug, Serialize)]
pub struct StudySummary {
    pub path: String,
    pub canonical: String,
    pub left_edges: usize,
    pub right_edges: usize,
    pub base_edges: usize,
    pub max_angles: [u32; 2],
    /// `from -> to` per spine edge.
    pub spine: Vec<String>,
    pub spine_count_form: String,
    pub count_form: String,
    pub minimal_ancestor: String,
    pub diagnostics: Vec<String>,
    /// Spine total in the plane for the given apex.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spine_total: Option<[f64; 2]>,
}

pub fn study_summary(path: &EdgePath, cfg: StudyCfg, apex: Option<&ApexArg>) -> StudySummary {
    let study = PathStudy::with_cfg(path.clone(), cfg);
    let spine = study
        .spine_edges()
        .iter()
        .map(|&id| {
            let e = study.edge(id);
            format!("{} -> {}", study.vertex(e.from).pos, study.vertex(e.to).pos)
        })
        .collect();
    let counts = counts_for_edge_path(study.path());
    let spine_total = apex.map(|apex| {
        let mut field = PathGeometryField::new(&apex.as_float());
        let total: Offset<f64> = study
            .spine_edges()
            .iter()
            .map(|&id| field.offset_for_edge_vector(&study.edge(id).edge_vector))
            .sum();
        [total.dx, total.dy]
    });
    StudySummary {
        path: study.path().to_string(),
        canonical: canonicalize_edge_path(study.path()).to_string(),
        left_edges: study.left_edges().len(),
        right_edges: study.right_edges().len(),
        base_edges: study.base_edges().len(),
        max_angles: study.max_angles(),
        spine,
        spine_count_form: study.count_form().to_string(),
        count_form: counts.to_string(),
        minimal_ancestor: counts.minimal_ancestor().to_string(),
        diagnostics: study.diagnostics().iter().map(|d| d.to_string()).collect(),
        spine_total,
    }
}

/// Value of constraint `(left, right)`: the polynomial in `x, y` without an
/// apex, else its value (exact or floating, following the apex).
pub fn constraint_value(
    study: &PathStudy,
    left: usize,
    right: usize,
    apex: Option<&ApexArg>,
) -> Result<String> {
    let value = match apex {
        None => {
            let symbolic = Apex::new(Polynomial::x(), Polynomial::y());
            study.constraint_functions(&symbolic)?.eval(left, right)?.to_string()
        }
        Some(ApexArg::Exact(apex)) => study.constraint_functions(apex)?.eval(left, right)?.to_string(),
        Some(ApexArg::Float(apex)) => study.constraint_functions(apex)?.eval(left, right)?.to_string(),
    };
    Ok(value)
}
