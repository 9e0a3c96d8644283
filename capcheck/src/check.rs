use crate::helpe::*;

/// Maximum acceptable rounding error when comparing a reported
/// capacity against a sum computed from its sub-pools. The tool
/// prints one decimal place, so anything past ~1e-3 is a real
/// disagreement between counters, not float noise.
pub const FLOAT_COMPARISON_TOLERANCE: Kilobytes = 0.0011;

/// Identifies one of the relations [`collect_violations`] enforces,
/// in the order it enforces them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Relation {
    NewMinBelowMax,
    NewAboveMin,
    NewBelowMax,
    SurvivorZeroFits,
    SurvivorOneFits,
    EdenFits,
    NewSpacesSum,
    OldMinBelowMax,
    OldAboveMin,
    OldBelowMax,
    OldSpaceIdentity,
    MetaMinBelowMax,
    MetaAboveMin,
    MetaBelowMax,
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered = match self {
            Self::NewMinBelowMax    => "NGCMN <= NGCMX",
            Self::NewAboveMin       => "NGC >= NGCMN",
            Self::NewBelowMax       => "NGC <= NGCMX",
            Self::SurvivorZeroFits  => "S0C <= NGC",
            Self::SurvivorOneFits   => "S1C <= NGC",
            Self::EdenFits          => "EC <= NGC",
            Self::NewSpacesSum      => "NGC ~ S0C + S1C + EC",
            Self::OldMinBelowMax    => "OGCMN <= OGCMX",
            Self::OldAboveMin       => "OGC >= OGCMN",
            Self::OldBelowMax       => "OGC <= OGCMX",
            Self::OldSpaceIdentity  => "OC == OGC",
            Self::MetaMinBelowMax   => "MCMN <= MCMX",
            Self::MetaAboveMin      => "MC >= MCMN",
            Self::MetaBelowMax      => "MC <= MCMX",
        };

        write!(f, "{}", rendered)
    }
}

/// A domain relation that did not hold, with the offending operands
/// already rendered into the message. This is the signal the whole
/// crate exists to produce: deterministic for a fixed row, so a rerun
/// reproduces it verbatim.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("violated {relation}: {message}")]
pub struct Violation {
    pub relation:   Relation,
    pub message:    String,
}

#[derive(Error, Debug)]
pub enum CheckError {
    /// The producing process exited non-zero. None of its numbers can
    /// be trusted, so no numeric relation gets evaluated.
    #[error("unexpected exit code: {0}")]
    ExitCode(i32),
    /// A column some check depends on is absent from the report, or
    /// holds a token that does not parse as a number. `raw` carries
    /// the token in the latter case.
    #[error("no numeric value under column `{column}`")]
    FieldMissing {
        column: String,
        raw:    Option<String>,
    },
    #[error(transparent)]
    Violation(#[from] Violation),
}

/// Runs every consistency check against one report, in a fixed order.
///
/// Fatal conditions abort immediately with `Err`: a non-zero exit
/// status (before any column is read, since the numbers of a dead
/// tool are noise) and an unanswerable column lookup. A relation that
/// merely fails becomes a [`Violation`] in the returned vector and
/// checking continues, so one bad row reports everything wrong with
/// it at once. Vector order is check order; nothing is deduplicated.
pub fn collect_violations(
    report:     &CapacityReport,
    variant:    CollectorVariant,
) -> Result<Vec<Violation>, CheckError> {
    let exit_status = report.exit_status();
    if exit_status != 0 {
        return Err(CheckError::ExitCode(exit_status));
    }

    let mut found: Vec<Violation> = vec![];
    let mut fails = |relation: Relation, message: String| {
        found.push(Violation { relation, message });
    };

    // New (young) generation: min <= current <= max, and each space
    // fits inside the current capacity on its own.
    let ngcmn = report.float_value("NGCMN")?;
    let ngcmx = report.float_value("NGCMX")?;
    if ngcmx < ngcmn {
        fails(Relation::NewMinBelowMax, format!(
            "NGCMN > NGCMX (min new generation capacity {:.1} above max {:.1})",
            ngcmn, ngcmx));
    }
    let ngc = report.float_value("NGC")?;
    if ngc < ngcmn {
        fails(Relation::NewAboveMin, format!(
            "NGC < NGCMN (new generation capacity {:.1} below min {:.1})",
            ngc, ngcmn));
    }
    if ngc > ngcmx {
        fails(Relation::NewBelowMax, format!(
            "NGC > NGCMX (new generation capacity {:.1} above max {:.1})",
            ngc, ngcmx));
    }

    let s0c = report.float_value("S0C")?;
    if s0c > ngc {
        fails(Relation::SurvivorZeroFits, format!(
            "S0C > NGC (survivor space 0 capacity {:.1} above new generation capacity {:.1})",
            s0c, ngc));
    }
    let s1c = report.float_value("S1C")?;
    if s1c > ngc {
        fails(Relation::SurvivorOneFits, format!(
            "S1C > NGC (survivor space 1 capacity {:.1} above new generation capacity {:.1})",
            s1c, ngc));
    }
    let ec = report.float_value("EC")?;
    if ec > ngc {
        fails(Relation::EdenFits, format!(
            "EC > NGC (eden space capacity {:.1} above new generation capacity {:.1})",
            ec, ngc));
    }

    // How NGC relates to S0C + S1C + EC depends on the tenured
    // strategy. A parallel one sizes the young spaces independently,
    // so the sum only bounds NGC from below. Any other one tiles the
    // generation with the three spaces, so the sum must match NGC up
    // to rounding.
    let span = s0c + s1c + ec;
    let sum_msg = format!(
        "NGC {} (S0C + S1C + EC) (NGC = {:.1}, S0C = {:.1}, S1C = {:.1}, EC = {:.1}, (S0C + S1C + EC) = {:.1})",
        if variant == CollectorVariant::Parallel { "<" } else { "!=" },
        ngc, s0c, s1c, ec, span);
    match variant {
        CollectorVariant::Parallel  => {
            if ngc < span {
                fails(Relation::NewSpacesSum, sum_msg);
            }
        },
        CollectorVariant::Exact     => {
            if !float_is_sum(ngc, &[s0c, s1c, ec]) {
                fails(Relation::NewSpacesSum, sum_msg);
            }
        },
    }

    // Old (tenured) generation: the same bounds, plus the identity
    // with the old space.
    let ogcmn = report.float_value("OGCMN")?;
    let ogcmx = report.float_value("OGCMX")?;
    if ogcmx < ogcmn {
        fails(Relation::OldMinBelowMax, format!(
            "OGCMN > OGCMX (min old generation capacity {:.1} above max {:.1})",
            ogcmn, ogcmx));
    }
    let ogc = report.float_value("OGC")?;
    if ogc < ogcmn {
        fails(Relation::OldAboveMin, format!(
            "OGC < OGCMN (old generation capacity {:.1} below min {:.1})",
            ogc, ogcmn));
    }
    if ogc > ogcmx {
        fails(Relation::OldBelowMax, format!(
            "OGC > OGCMX (old generation capacity {:.1} above max {:.1})",
            ogc, ogcmx));
    }
    let oc = report.float_value("OC")?;
    // No tolerance here. The old space is the single pool making up
    // the old generation, so both columns restate one counter and
    // must agree to the bit.
    if oc != ogc {
        fails(Relation::OldSpaceIdentity, format!(
            "OC != OGC (old space capacity {:.1}, old generation capacity {:.1})",
            oc, ogc));
    }

    // Metaspace: bounds only, it has no sub-pools to cross-check.
    let mcmn = report.float_value("MCMN")?;
    let mcmx = report.float_value("MCMX")?;
    if mcmx < mcmn {
        fails(Relation::MetaMinBelowMax, format!(
            "MCMN > MCMX (min metaspace capacity {:.1} above max {:.1})",
            mcmn, mcmx));
    }
    let mc = report.float_value("MC")?;
    if mc < mcmn {
        fails(Relation::MetaAboveMin, format!(
            "MC < MCMN (metaspace capacity {:.1} below min {:.1})",
            mc, mcmn));
    }
    if mc > mcmx {
        fails(Relation::MetaBelowMax, format!(
            "MC > MCMX (metaspace capacity {:.1} above max {:.1})",
            mc, mcmx));
    }

    Ok(found)
}

/// Fail-fast surface over [`collect_violations`]: `Ok` when every
/// relation holds, otherwise the first problem found.
pub fn assert_consistency(
    report:     &CapacityReport,
    variant:    CollectorVariant,
) -> Result<(), CheckError> {
    let mut found = collect_violations(report, variant)?;
    if found.is_empty() {
        Ok(())
    } else {
        Err(CheckError::Violation(found.remove(0)))
    }
}

#[inline(always)]
fn float_is_sum(sum: Kilobytes, parts: &[Kilobytes]) -> bool {
    let mut rem = sum;
    for p in parts {
        rem -= p;
    }

    rem.abs() <= FLOAT_COMPARISON_TOLERANCE
}
