//! Serde helpers that keep non-finite floats across JSON round trips.
//!
//! JSON has no NaN or infinity and `serde_json` writes them as `null`.
//! Trial records encode them as the strings `"NaN"`, `"inf"` and `"-inf"`
//! instead. Parameter values use `{"float": "NaN"}` so a categorical
//! choice labelled `"NaN"` stays categorical.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Clone, Copy, Serialize, Deserialize)]
enum Special {
    #[serde(rename = "NaN")]
    Nan,
    #[serde(rename = "inf")]
    Inf,
    #[serde(rename = "-inf")]
    NegInf,
}

#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
enum Repr {
    Finite(f64),
    Special(Special),
}

impl From<f64> for Repr {
    fn from(v: f64) -> Self {
        if v.is_nan() {
            Self::Special(Special::Nan)
        } else if v.is_infinite() && v.is_sign_positive() {
            Self::Special(Special::Inf)
        } else if v.is_infinite() {
            Self::Special(Special::NegInf)
        } else {
            Self::Finite(v)
        }
    }
}

impl From<Repr> for f64 {
    fn from(r: Repr) -> Self {
        match r {
            Repr::Finite(v) => v,
            Repr::Special(Special::Nan) => f64::NAN,
            Repr::Special(Special::Inf) => f64::INFINITY,
            Repr::Special(Special::NegInf) => f64::NEG_INFINITY,
        }
    }
}

/// `Option<f64>` fields such as the objective value.
pub(crate) mod option {
    use super::{Deserialize, Deserializer, Repr, Serialize, Serializer};

    #[allow(clippy::ref_option)]
    pub(crate) fn serialize<S: Serializer>(value: &Option<f64>, s: S) -> Result<S::Ok, S::Error> {
        value.map(Repr::from).serialize(s)
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(Option::<Repr>::deserialize(d)?.map(f64::from))
    }
}

/// Optional `(step, value)` lists of intermediate values.
pub(crate) mod steps {
    use super::{Deserialize, Deserializer, Repr, Serialize, Serializer};

    #[allow(clippy::ref_option)]
    pub(crate) fn serialize<S: Serializer>(
        value: &Option<Vec<(u64, f64)>>,
        s: S,
    ) -> Result<S::Ok, S::Error> {
        value
            .as_ref()
            .map(|steps| {
                steps
                    .iter()
                    .map(|&(step, v)| (step, Repr::from(v)))
                    .collect::<Vec<_>>()
            })
            .serialize(s)
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<Vec<(u64, f64)>>, D::Error> {
        let steps = Option::<Vec<(u64, Repr)>>::deserialize(d)?;
        Ok(steps.map(|steps| {
            steps
                .into_iter()
                .map(|(step, v)| (step, f64::from(v)))
                .collect()
        }))
    }
}

/// The float variant of an untagged parameter value.
pub(crate) mod param {
    use super::{Deserialize, Deserializer, Serialize, Serializer, Special};

    #[derive(Serialize, Deserialize)]
    #[serde(untagged)]
    enum ParamFloat {
        Finite(f64),
        Special { float: Special },
    }

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub(crate) fn serialize<S: Serializer>(value: &f64, s: S) -> Result<S::Ok, S::Error> {
        let repr = match super::Repr::from(*value) {
            super::Repr::Finite(v) => ParamFloat::Finite(v),
            super::Repr::Special(float) => ParamFloat::Special { float },
        };
        repr.serialize(s)
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        Ok(match ParamFloat::deserialize(d)? {
            ParamFloat::Finite(v) => v,
            ParamFloat::Special { float } => f64::from(super::Repr::Special(float)),
        })
    }
}
