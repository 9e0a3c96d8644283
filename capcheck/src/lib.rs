//! Welcome to `capcheck`!

mod report;

pub mod check;
pub mod variant;
pub mod helpe;

pub use crate::helpe::*;

/// Our fundamental unit of interest. A [`CapacityReport`] is one row
/// of the capacity table printed by the instrumentation tool, plus the
/// exit status of the process that printed it:
///
/// ```text
/// NGCMN    NGCMX     NGC     S0C    S1C      EC      OGCMN      OGCMX       OGC        OC     MCMN     MCMX      MC    YGC  FGC
/// 41984.0 671744.0  41984.0 5248.0 5248.0  31488.0  83968.0  1343488.0  83968.0  83968.0    512.0 110592.0  4480.0      0    0
/// ```
///
/// All capacities are kilobytes. `NGCMN`/`NGCMX`/`NGC` are the
/// minimum, maximum and current capacity of the new (young)
/// generation; `S0C`, `S1C` and `EC` the current capacities of its
/// survivor and eden spaces. `OGCMN`/`OGCMX`/`OGC` bound the old
/// (tenured) generation and `OC` is the current capacity of the old
/// *space* it contains. `MCMN`/`MCMX`/`MC` do the same for the
/// metaspace. `YGC` and `FGC` count young and full collection events.
///
/// > ***ATTENTION:*** a report stores raw text tokens, not numbers.
/// > [`float_value`](CapacityReport::float_value) is where numbers are
/// > born, and where a missing or garbled column surfaces. Rows are
/// > built once, read during validation, then dropped; nothing in the
/// > crate mutates one.
#[derive(Debug, Clone)]
pub struct CapacityReport {
    values:         IndexMap<String, String>,
    exit_status:    i32,
}
