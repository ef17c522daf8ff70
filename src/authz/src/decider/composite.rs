//! AND / OR composition of deciders

use super::{Decider, PrincipalSupplier};
use crate::decision::{DenialReason, Verdict};
use crate::error::Result;

/// First denial wins. Abstentions are skipped; if every child abstains the
/// composite abstains too.
pub(super) fn all_of(children: &[Decider], principal: &dyn PrincipalSupplier) -> Result<Verdict> {
    let mut granted = false;
    for child in children {
        match child.evaluate(principal)? {
            Verdict::Granted => granted = true,
            denied @ Verdict::Denied { .. } => return Ok(denied),
            Verdict::Abstain => {}
        }
    }

    Ok(if granted { Verdict::Granted } else { Verdict::Abstain })
}

/// First grant wins. Otherwise deny with every child's reason, or abstain if
/// nobody had an opinion.
pub(super) fn any_of(children: &[Decider], principal: &dyn PrincipalSupplier) -> Result<Verdict> {
    let mut reasons = Vec::new();
    for child in children {
        match child.evaluate(principal)? {
            Verdict::Granted => return Ok(Verdict::Granted),
            Verdict::Denied { reason } => reasons.push(reason),
            Verdict::Abstain => {}
        }
    }

    Ok(match reasons.len() {
        0 => Verdict::Abstain,
        1 => Verdict::denied(reasons.remove(0)),
        _ => Verdict::denied(DenialReason::NoneSatisfied { reasons }),
    })
}
