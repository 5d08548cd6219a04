//! Exact bivariate polynomials in the apex coordinates `x`, `y`.
//!
//! Used as the scalar of `PathGeometryRing` to obtain constraint functions
//! symbolically. Terms are kept sparse and normalised (no zero
//! coefficients), so structural equality is polynomial equality.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

/// Exponent pair `(deg_x, deg_y)`.
pub type Monomial = (u32, u32);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Polynomial {
    terms: BTreeMap<Monomial, BigRational>,
}

impl Polynomial {
    pub fn x() -> Self {
        Self::monomial((1, 0), BigRational::one())
    }

    pub fn y() -> Self {
        Self::monomial((0, 1), BigRational::one())
    }

    pub fn constant(c: BigRational) -> Self {
        Self::monomial((0, 0), c)
    }

    pub fn monomial(m: Monomial, c: BigRational) -> Self {
        let mut terms = BTreeMap::new();
        if !c.is_zero() {
            terms.insert(m, c);
        }
        Self { terms }
    }

    /// Coefficient of `x^i y^j` (zero when absent).
    pub fn coefficient(&self, m: Monomial) -> BigRational {
        self.terms.get(&m).cloned().unwrap_or_else(BigRational::zero)
    }

    pub fn terms(&self) -> impl Iterator<Item = (&Monomial, &BigRational)> {
        self.terms.iter()
    }

    /// Total degree; `None` for the zero polynomial.
    pub fn degree(&self) -> Option<u32> {
        self.terms.keys().map(|(i, j)| i + j).max()
    }

    pub fn pow(&self, n: u32) -> Self {
        let mut result = Self::one();
        for _ in 0..n {
            result = &result * self;
        }
        result
    }

    pub fn eval(&self, x: &BigRational, y: &BigRational) -> BigRational {
        self.terms.iter().fold(BigRational::zero(), |acc, (&(i, j), c)| {
            acc + c * num_traits::pow(x.clone(), i as usize) * num_traits::pow(y.clone(), j as usize)
        })
    }

    /// Floating evaluation (coefficients rounded to `f64`).
    pub fn eval_f64(&self, x: f64, y: f64) -> f64 {
        self.terms
            .iter()
            .map(|(&(i, j), c)| {
                c.to_f64().unwrap_or(f64::NAN) * x.powi(i as i32) * y.powi(j as i32)
            })
            .sum()
    }

    fn add_term(&mut self, m: Monomial, c: BigRational) {
        let entry = self.terms.entry(m).or_insert_with(BigRational::zero);
        *entry += c;
        if entry.is_zero() {
            self.terms.remove(&m);
        }
    }

    /// Terms in graded order: total degree descending, then `x` degree descending.
    fn graded_terms(&self) -> Vec<(&Monomial, &BigRational)> {
        let mut terms: Vec<_> = self.terms.iter().collect();
        terms.sort_by(|(a, _), (b, _)| (b.0 + b.1, b.0).cmp(&(a.0 + a.1, a.0)));
        terms
    }
}

impl From<i64> for Polynomial {
    fn from(c: i64) -> Self {
        Self::constant(BigRational::from_integer(c.into()))
    }
}

impl From<BigRational> for Polynomial {
    fn from(c: BigRational) -> Self {
        Self::constant(c)
    }
}

impl<'a> Add<&'a Polynomial> for &'a Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: &'a Polynomial) -> Polynomial {
        let mut out = self.clone();
        for (&m, c) in &rhs.terms {
            out.add_term(m, c.clone());
        }
        out
    }
}

impl<'a> Sub<&'a Polynomial> for &'a Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: &'a Polynomial) -> Polynomial {
        let mut out = self.clone();
        for (&m, c) in &rhs.terms {
            out.add_term(m, -c.clone());
        }
        out
    }
}

impl<'a> Mul<&'a Polynomial> for &'a Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &'a Polynomial) -> Polynomial {
        let mut out = Polynomial::zero();
        for (&(i1, j1), c1) in &self.terms {
            for (&(i2, j2), c2) in &rhs.terms {
                out.add_term((i1 + i2, j1 + j2), c1 * c2);
            }
        }
        out
    }
}

impl Add for Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: Polynomial) -> Polynomial {
        &self + &rhs
    }
}

impl Sub for Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: Polynomial) -> Polynomial {
        &self - &rhs
    }
}

impl Mul for Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: Polynomial) -> Polynomial {
        &self * &rhs
    }
}

impl Neg for Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        Polynomial {
            terms: self.terms.into_iter().map(|(m, c)| (m, -c)).collect(),
        }
    }
}

impl Zero for Polynomial {
    fn zero() -> Self {
        Self::default()
    }

    fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }
}

impl One for Polynomial {
    fn one() -> Self {
        Self::constant(BigRational::one())
    }
}

fn write_monomial(f: &mut fmt::Formatter<'_>, (i, j): Monomial) -> fmt::Result {
    let mut first = true;
    for (var, deg) in [("x", i), ("y", j)] {
        if deg == 0 {
            continue;
        }
        if !first {
            write!(f, "*")?;
        }
        first = false;
        write!(f, "{var}")?;
        if deg > 1 {
            write!(f, "^{deg}")?;
        }
    }
    Ok(())
}

/// Sage-style: `-3*x^4 - 2*x^2*y^2 + y^4 + 6*x^3`.
impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms = self.graded_terms();
        if terms.is_empty() {
            return write!(f, "0");
        }
        for (k, (&m, c)) in terms.into_iter().enumerate() {
            let negative = c.is_negative();
            match (k, negative) {
                (0, true) => write!(f, "-")?,
                (0, false) => {}
                (_, true) => write!(f, " - ")?,
                (_, false) => write!(f, " + ")?,
            }
            let magnitude = c.abs();
            if m == (0, 0) {
                write!(f, "{magnitude}")?;
            } else if magnitude.is_one() {
                write_monomial(f, m)?;
            } else {
                write!(f, "{magnitude}*")?;
                write_monomial(f, m)?;
            }
        }
        Ok(())
    }
}
