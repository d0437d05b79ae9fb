//! `RPTRST` restart output controls.

use std::collections::BTreeMap;

use deckflow_foundation::{DeckKeyword, ErrorGuard, ParseContext, Result};

use crate::normalise::{
    AllowList, IntegerHandler, MnemonicMap, RptKeywordNormaliser, to_value,
};

/// Positional integer controls of `RPTRST`.
///
/// Position 26 is the capillary pressure slot and expands to both `PCOW` and
/// `PCOG`.
pub const RPTRST_INTEGER_CONTROLS: [&str; 31] = [
    "BASIC", "FLOWS", "FIP", "POT", "PBPD", "FREQ", "PRES", "VISC", "DEN", "DRAIN", "KRO", "KRW",
    "KRG", "PORO", "NOGRAD", "NORST", "SAVE", "SFREQ", "ALLPROPS", "ROCKC", "SGTRAP", "",
    "RSSAT", "RVSAT", "GIMULT", "SURFBLK", "", "STREAM", "RK", "VELOCITY", "COMPRESS",
];

const PCO_SLOT: usize = 26;

/// Valid `RPTRST` mnemonics for black oil runs, sorted.
pub const RPTRST_BASE_MNEMONICS: &[&str] = &[
    "ACIP", "ACIS", "ALLPROPS", "BASIC", "BG", "BO", "BW", "CELLINDX", "COMPRESS", "CONV",
    "DEN", "DENG", "DENO", "DENW", "DRAIN", "DRAINAGE", "DYNREG", "FIP", "FLORES", "FLORES-",
    "FLOWS", "FLOWS-", "FREQ", "GIMULT", "HYDH", "HYDHFW", "KRG", "KRO", "KRW", "NOGRAD",
    "NORST", "NPMREB", "PBPD", "PCGW", "PCOG", "PCOW", "PERMREDN", "POIS", "PORO", "PORV",
    "POT", "PRES", "RESIDUAL", "RFIP", "RK", "ROCKC", "RPORV", "RSSAT", "RSWSAT", "RVSAT",
    "RVWSAT", "SAVE", "SDENO", "SFIP", "SFREQ", "SGTRAP", "SIGM_MOD", "STREAM", "SURFBLK",
    "TEMP", "TRAS", "VELGAS", "VELOCITY", "VELOIL", "VELWAT", "VGAS", "VISC", "VOIL", "VWAT",
];

/// Valid `RPTRST` mnemonics for compositional runs, sorted.
pub const RPTRST_COMPOSITIONAL_MNEMONICS: &[&str] = &[
    "AIM", "ALSTML", "ALSURF", "AMF", "AQPH", "AQSP", "AREAC", "ASPADS", "ASPDOT", "ASPENT",
    "ASPFLO", "ASPFLT", "ASPFRD", "ASPKDM", "ASPLIM", "ASPLUG", "ASPRET", "ASPREW", "ASPVEL",
    "ASPVOM", "BASIC", "BFORO", "BG", "BGAS", "BO", "BOIL", "BSOL", "BTFORG", "BTFORO", "BW",
    "BWAT", "CELLINDX", "CFL", "CGAS", "COILR", "COLR", "CONV", "DENG", "DENO", "DENS",
    "DENW", "DYNREG", "ENERGY", "ESALTP", "ESALTS", "FFACTG", "FFACTO", "FFORO", "FIP",
    "FLOE", "FLOGAS", "FLOOIL", "FLORES", "FLORES-", "FLOWAT", "FMISC", "FOAM", "FOAMCNM",
    "FOAMMOB", "FOAMST", "FPC", "FREQ", "FUGG", "FUGO", "GASPOT", "HGAS", "HOIL", "HSOL",
    "HWAT", "JV", "KRG", "KRGDM", "KRO", "KRODM", "KRW", "KRWDM", "LGLCHC", "LGLCWAT", "MLSC",
    "MWAT", "NCNG", "NCNO", "NPMREB", "OILPOT", "PART", "PCGW", "PCOG", "PCOW", "PERM_MDX",
    "PERM_MDY", "PERM_MDZ", "PERM_MOD", "PGAS", "PKRG", "PKRGR", "PKRO", "PKRORG", "PKRORW",
    "PKRW", "PKRWR", "POIL", "POLY", "POLYVM", "PORV", "PORV_MOD", "PPCG", "PPCW", "PRES",
    "PRESMIN", "PRESSURE", "PRES_EFF", "PSAT", "PSGCR", "PSGL", "PSGU", "PSOGCR", "PSOWCR",
    "PSWCR", "PSWL", "PSWU", "PVDPH", "PWAT", "RATP", "RATS", "RATT", "REAC", "RESTART",
    "RFIP", "ROCKC", "ROMLS", "RPORV", "RS", "RSSAT", "RSW", "RV", "RVSAT", "SFIP", "SFIPGAS",
    "SFIPOIL", "SFIPWAT", "SFOIL", "SFSOL", "SGAS", "SGASMAX", "SGCRH", "SGTRAP", "SGTRH",
    "SIGM_MOD", "SMF", "SMMULT", "SOIL", "SOILM", "SOILMAX", "SOILR", "SOLADS", "SOLADW",
    "SOLWET", "SSFRAC", "SSOLID", "STATE", "STEN", "SUBG", "SURF", "SURFCNM", "SURFCP",
    "SURFKR", "SURFST", "SWAT", "SWATMIN", "TCBULK", "TCMULT", "TEMP", "TOTCOMP", "TREACM",
    "TSUB", "VGAS", "VMF", "VOIL", "VWAT", "WATPOT", "XFW", "XGAS", "XMF", "XWAT", "YFW",
    "YMF", "ZMF",
];

/// Mnemonics that `ALLPROPS` stands for.
pub const ALLPROPS_EXPANSION: [&str; 10] =
    ["BG", "BO", "BW", "KRG", "KRO", "KRW", "VOIL", "VGAS", "VWAT", "DEN"];

/// Integer control handler for `RPTRST`.
///
/// Values are kept as written. `BASIC` is only emitted when its value is
/// non-zero or at least as many controls as the capillary pressure slot
/// index are given.
#[derive(Debug, Clone, Copy, Default)]
pub struct RptRstIntegerControls;

impl IntegerHandler for RptRstIntegerControls {
    fn expand(&self, values: &[i64]) -> Result<MnemonicMap> {
        let count = values.len().min(RPTRST_INTEGER_CONTROLS.len());
        let mut map = MnemonicMap::new();
        if count == 0 {
            return Ok(map);
        }
        if count >= PCO_SLOT || values[0] != 0 {
            map.insert("BASIC".to_string(), to_value(values[0])?);
        }
        for (index, value) in values.iter().enumerate().take(count).skip(1) {
            if index == PCO_SLOT {
                let value = to_value(*value)?;
                map.insert("PCOW".to_string(), value);
                map.insert("PCOG".to_string(), value);
                continue;
            }
            let name = RPTRST_INTEGER_CONTROLS[index];
            if !name.is_empty() {
                map.insert(name.to_string(), to_value(*value)?);
            }
        }
        Ok(map)
    }
}

/// The `RPTRST` normaliser type.
pub type RptRstNormaliser = RptKeywordNormaliser<RptRstIntegerControls, AllowList>;

/// Builds the `RPTRST` normaliser for black oil or compositional runs.
///
/// # Errors
///
/// See [`RptKeywordNormaliser::new`].
pub fn rptrst_normaliser(compositional: bool) -> Result<RptRstNormaliser> {
    let names = if compositional {
        RPTRST_COMPOSITIONAL_MNEMONICS
    } else {
        RPTRST_BASE_MNEMONICS
    };
    RptKeywordNormaliser::new(RptRstIntegerControls, AllowList::new(names))
}

/// A parsed `RPTRST` keyword.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RptRstRequest {
    /// Output mnemonics, without `BASIC` and `FREQ`, `ALLPROPS` expanded.
    pub mnemonics: BTreeMap<String, i32>,
    /// `BASIC` value, if given.
    pub basic: Option<i32>,
    /// `FREQ` value, if given.
    pub freq: Option<i32>,
}

/// Parses an `RPTRST` keyword on its own.
///
/// # Errors
///
/// Fails when a diagnostic is fatal under `ctx`.
pub fn parse_rptrst(
    keyword: &DeckKeyword,
    compositional: bool,
    ctx: &ParseContext,
    guard: &mut ErrorGuard,
) -> Result<RptRstRequest> {
    let normalised =
        rptrst_normaliser(compositional)?.normalise(keyword, &MnemonicMap::new(), ctx, guard)?;
    let mut mnemonics: BTreeMap<String, i32> = normalised.into_iter().collect();
    let basic = mnemonics.remove("BASIC");
    let freq = mnemonics.remove("FREQ");
    expand_allprops(&mut mnemonics);
    Ok(RptRstRequest {
        mnemonics,
        basic,
        freq,
    })
}

/// Replaces `ALLPROPS` by the mnemonics it stands for, all with its value.
pub fn expand_allprops(mnemonics: &mut BTreeMap<String, i32>) {
    if let Some(value) = mnemonics.remove("ALLPROPS") {
        for name in ALLPROPS_EXPANSION {
            mnemonics.insert(name.to_string(), value);
        }
    }
}
