/// Candidate catalogs for the probe sweeps.
///
/// Defines the curated alias groups, granularity probe subjects, and
/// per-granularity lookback ladders that the sweeps expand into candidate
/// sequences. This is the single source of truth for what gets probed —
/// sweep code should draw from here rather than hardcoding site names.
///
/// The alias lists come from operator experience with the KDM service:
/// upstream recognizes some historical facility names (의암댐) but not
/// others (의암수력, code-prefixed forms), and the only way to find out
/// is to ask.

use crate::model::{Candidate, FacilityType, Granularity};

// ---------------------------------------------------------------------------
// Name-resolution catalog
// ---------------------------------------------------------------------------

/// Candidate identifiers for one physical site.
///
/// Every alias is probed against the site's expected facility type and a
/// canonical measurement item; the sweep discovers which strings upstream
/// actually resolves.
pub struct AliasGroup {
    /// Human name for the physical site the aliases refer to.
    pub physical_site: &'static str,
    pub facility_type: FacilityType,
    /// Canonical measurement item known to exist for this facility type.
    pub measurement_item: &'static str,
    pub aliases: &'static [&'static str],
}

/// Granularity and lookback used for every name-resolution probe. Three
/// days of daily data is the cheapest query that still distinguishes a
/// recognized name from an unrecognized one.
pub const NAME_SWEEP_GRANULARITY: Granularity = Granularity::D1;
pub const NAME_SWEEP_LOOKBACK_DAYS: u32 = 3;

pub static ALIAS_CATALOG: &[AliasGroup] = &[
    // 한강 수계 발전용 댐 — the names KDM lists for these differ from the
    // K-water facility codes, hence the variants.
    AliasGroup {
        physical_site: "의암",
        facility_type: FacilityType::Dam,
        measurement_item: "저수율",
        aliases: &["의암댐", "의암수력", "C15 의암댐"],
    },
    AliasGroup {
        physical_site: "팔당",
        facility_type: FacilityType::Dam,
        measurement_item: "저수율",
        aliases: &["팔당댐", "팔당수력", "C122 팔당댐"],
    },
    AliasGroup {
        physical_site: "춘천",
        facility_type: FacilityType::Dam,
        measurement_item: "저수율",
        aliases: &["춘천댐", "C8 춘천댐"],
    },
    AliasGroup {
        physical_site: "청평",
        facility_type: FacilityType::Dam,
        measurement_item: "저수율",
        aliases: &["청평댐", "C39 청평댐"],
    },
    // Multipurpose dams expected to resolve; kept in the sweep as a
    // positive control for the dam facility type.
    AliasGroup {
        physical_site: "소양강",
        facility_type: FacilityType::Dam,
        measurement_item: "저수율",
        aliases: &["소양강댐"],
    },
    AliasGroup {
        physical_site: "충주",
        facility_type: FacilityType::Dam,
        measurement_item: "저수율",
        aliases: &["충주댐"],
    },
    AliasGroup {
        physical_site: "대청",
        facility_type: FacilityType::Dam,
        measurement_item: "저수율",
        aliases: &["대청댐"],
    },
    AliasGroup {
        physical_site: "안동",
        facility_type: FacilityType::Dam,
        measurement_item: "저수율",
        aliases: &["안동댐"],
    },
    // 수위관측소
    AliasGroup {
        physical_site: "춘천 수위",
        facility_type: FacilityType::WaterLevel,
        measurement_item: "수위",
        aliases: &["춘천", "춘천시(춘천댐하류)", "환_춘천댐하"],
    },
    AliasGroup {
        physical_site: "의암 수위",
        facility_type: FacilityType::WaterLevel,
        measurement_item: "수위",
        aliases: &["의암"],
    },
    AliasGroup {
        physical_site: "청평 수위",
        facility_type: FacilityType::WaterLevel,
        measurement_item: "수위",
        aliases: &["청평"],
    },
    AliasGroup {
        physical_site: "팔당 수위",
        facility_type: FacilityType::WaterLevel,
        measurement_item: "수위",
        aliases: &["팔당"],
    },
    // 우량관측소
    AliasGroup {
        physical_site: "소양강댐 우량",
        facility_type: FacilityType::Rainfall,
        measurement_item: "우량",
        aliases: &["소양강댐우량"],
    },
    AliasGroup {
        physical_site: "춘천 우량",
        facility_type: FacilityType::Rainfall,
        measurement_item: "우량",
        aliases: &["춘천우량"],
    },
    AliasGroup {
        physical_site: "의암 우량",
        facility_type: FacilityType::Rainfall,
        measurement_item: "우량",
        aliases: &["의암우량"],
    },
    AliasGroup {
        physical_site: "청평 우량",
        facility_type: FacilityType::Rainfall,
        measurement_item: "우량",
        aliases: &["청평우량"],
    },
    // 기상관측소
    AliasGroup {
        physical_site: "소양강댐 기상",
        facility_type: FacilityType::Weather,
        measurement_item: "기온",
        aliases: &["소양강댐기상"],
    },
    AliasGroup {
        physical_site: "충주댐 기상",
        facility_type: FacilityType::Weather,
        measurement_item: "기온",
        aliases: &["충주댐기상"],
    },
    // 수질관측소
    AliasGroup {
        physical_site: "소양강댐 수질",
        facility_type: FacilityType::WaterQuality,
        measurement_item: "TOC",
        aliases: &["소양강댐수질", "소양강댐1"],
    },
    AliasGroup {
        physical_site: "팔당댐 수질",
        facility_type: FacilityType::WaterQuality,
        measurement_item: "TOC",
        aliases: &["팔당댐수질"],
    },
];

/// Expands the alias catalog into the fixed candidate sequence for the
/// name-resolution sweep. Order follows the catalog; aliases within a
/// group carry no ordering significance.
pub fn name_resolution_candidates() -> Vec<Candidate> {
    ALIAS_CATALOG
        .iter()
        .flat_map(|group| {
            group.aliases.iter().map(|alias| {
                Candidate::new(
                    alias,
                    group.facility_type,
                    group.measurement_item,
                    NAME_SWEEP_GRANULARITY,
                    NAME_SWEEP_LOOKBACK_DAYS,
                )
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Granularity sweep subjects
// ---------------------------------------------------------------------------

/// A fixed site/facility/item/lookback whose supported granularities are
/// unknown. The sweep tries all four `time_key` values against it.
pub struct GranularitySubject {
    pub site_name: &'static str,
    pub facility_type: FacilityType,
    pub measurement_item: &'static str,
    pub lookback_days: u32,
}

pub static GRANULARITY_SUBJECTS: &[GranularitySubject] = &[
    GranularitySubject {
        site_name: "소양강댐",
        facility_type: FacilityType::Dam,
        measurement_item: "저수율",
        lookback_days: 3,
    },
    // Water-quality sampling is sparse; a 3-day window would read as
    // unsupported even where mt_1/d_1 work, so this subject looks back 90.
    GranularitySubject {
        site_name: "소양강댐1",
        facility_type: FacilityType::WaterQuality,
        measurement_item: "TOC",
        lookback_days: 90,
    },
];

/// The four granularity candidates for one subject, in wire-key order.
pub fn granularity_candidates(subject: &GranularitySubject) -> Vec<Candidate> {
    Granularity::ALL
        .iter()
        .map(|granularity| {
            Candidate::new(
                subject.site_name,
                subject.facility_type,
                subject.measurement_item,
                *granularity,
                subject.lookback_days,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Boundary sweep subjects and ladders
// ---------------------------------------------------------------------------

/// A fixed site/facility/item/granularity whose maximum lookback depth is
/// unknown. The sweep walks the granularity's ladder bottom to top.
pub struct BoundarySubject {
    pub site_name: &'static str,
    pub facility_type: FacilityType,
    pub measurement_item: &'static str,
    pub granularity: Granularity,
}

pub static BOUNDARY_SUBJECTS: &[BoundarySubject] = &[
    BoundarySubject {
        site_name: "소양강댐",
        facility_type: FacilityType::Dam,
        measurement_item: "저수율",
        granularity: Granularity::H1,
    },
    BoundarySubject {
        site_name: "소양강댐",
        facility_type: FacilityType::Dam,
        measurement_item: "저수율",
        granularity: Granularity::D1,
    },
];

/// Ascending lookback values (in days) probed for each granularity.
///
/// The ladders are deliberately coarse: the goal is the order of magnitude
/// at which upstream stops answering, not a day-exact threshold. The deep
/// d_1 steps (10–30 years) exist because daily archives have been observed
/// to reach decades back for the older multipurpose dams.
pub fn lookback_ladder(granularity: Granularity) -> &'static [u32] {
    match granularity {
        Granularity::Min10 => &[1, 3, 7, 14, 30],
        Granularity::H1 => &[7, 30, 60, 90, 180, 365],
        Granularity::D1 => &[
            30, 90, 180, 365, 730, 1095, 1460, 1825, 2190, 3650, 5475, 7300, 9125, 10950,
        ],
        Granularity::Mt1 => &[90, 365, 730, 1825, 3650],
    }
}

/// The ascending candidate sequence for one boundary subject.
pub fn boundary_candidates(subject: &BoundarySubject) -> Vec<Candidate> {
    lookback_ladder(subject.granularity)
        .iter()
        .map(|days| {
            Candidate::new(
                subject.site_name,
                subject.facility_type,
                subject.measurement_item,
                subject.granularity,
                *days,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
