//! `RPTSCHED` and `RPTSOL` report controls.

use deckflow_foundation::{DeckKeyword, ErrorGuard, ParseContext, Result};

use crate::normalise::{
    AllowList, MnemonicMap, PositionalTable, RptKeywordNormaliser, ValuePolicy,
};

/// Positional integer controls of `RPTSCHED`. Blank entries are reserved.
pub const RPTSCHED_INTEGER_CONTROLS: [&str; 79] = [
    "PRES", "SOIL", "SWAT", "SGAS", "RS", "RV", "RESTART", "FIP", "WELLS", "VFPPROD",
    "SUMMARY", "CPU", "AQUCT", "WELSPECS", "NEWTON", "POILD", "PWAT", "PWATD", "PGAS", "PGASD",
    "FIPVE", "WOC", "GOC", "WOCDIFF", "GOCDIFF", "WOCGOC", "ODGAS", "ODWAT", "GOCWAT", "OILAPI",
    "FIPITR", "TBLK", "PBLK", "SALT", "PLYADS", "RK", "FIPSALT", "TUNING", "GI", "ROCKC",
    "SPENWAT", "FIPSOL", "SURFBLK", "SURFADS", "FIPSURF", "TRADS", "VOIL", "VWAT", "VGAS", "DENO",
    "DENW", "DENG", "GASCONC", "PB", "PD", "KRW", "KRO", "KRG", "MULT", "", "", "FOAM",
    "FIPFOAM", "TEMP", "FIPTEMP", "POTC", "FOAMADS", "FOAMDCY", "FOAMMOB", "RECOV", "FLOOIL",
    "FLOWAT", "FLOGAS", "SGTRAP", "FIPRESV", "FLOSOL", "KRN", "GRAD", "",
];

/// Valid `RPTSCHED` mnemonics, sorted.
pub const RPTSCHED_MNEMONICS: &[&str] = &[
    "ALKALINE", "ANIONS", "AQUCT", "AQUFET", "AQUFETP", "BFORG", "CATIONS", "CONV", "CPU",
    "DENG", "DENO", "DENW", "ESALPLY", "ESALSUR", "FFORO", "FIP", "FIPFOAM", "FIPHEAT",
    "FIPITR", "FIPRESV", "FIPSALT", "FIPSOL", "FIPSURF", "FIPTEMP", "FIPTR", "FIPVE",
    "FLOGAS", "FLOOIL", "FLOSOL", "FLOWAT", "FMISC", "FOAM", "FOAMADS", "FOAMCNM", "FOAMDCY",
    "FOAMMOB", "GASCONC", "GASSATC", "GDOWAT", "GI", "GOC", "GOCDIFF", "GOCWAT", "GRAD",
    "KRG", "KRN", "KRO", "KRW", "MULT", "NEWTON", "NOTHING", "ODGAS", "ODWAT", "OILAPI", "PB",
    "PBLK", "PBU", "PCOG", "PCOW", "PD", "PDEW", "PGAS", "PGASD", "PLYADS", "POIL", "POILD",
    "POLYMER", "POTC", "POTG", "POTO", "POTW", "PRES", "PRESSURE", "PWAT", "PWATD", "RECOV",
    "RESTART", "RFIP", "RK", "ROCKC", "RS", "RSSAT", "RV", "RVSAT", "SALT", "SGAS", "SGTRAP",
    "SIGM_MOD", "SOIL", "SPENWAT", "SSOL", "SUMMARY", "SURFADS", "SURFBLK", "SWAT", "TBLK",
    "TEMP", "THPRES", "TRACER", "TRADS", "TRDCY", "TUNING", "VFPPROD", "VGAS", "VOIL", "VWAT",
    "WELLS", "WELSPECS", "WOC", "WOCDIFF", "WOCGOC",
];

/// Mnemonic that discards every earlier report request.
pub const NOTHING: &str = "NOTHING";

/// The `RPTSCHED` normaliser type.
pub type RptSchedNormaliser = RptKeywordNormaliser<PositionalTable, AllowList>;

/// Builds the `RPTSCHED` normaliser.
///
/// Integer controls are flags: a non-zero value at position *i* requests the
/// *i*-th mnemonic with value 1.
///
/// # Errors
///
/// See [`RptKeywordNormaliser::new`].
pub fn rptsched_normaliser() -> Result<RptSchedNormaliser> {
    RptKeywordNormaliser::new(
        PositionalTable::new(&RPTSCHED_INTEGER_CONTROLS, ValuePolicy::Flag),
        AllowList::new(RPTSCHED_MNEMONICS),
    )
}

/// Normalises an `RPTSCHED` (or `RPTSOL`) keyword on its own, without a
/// carried map.
///
/// # Errors
///
/// Fails when a diagnostic is fatal under `ctx`.
pub fn normalise_rptsched(
    keyword: &DeckKeyword,
    ctx: &ParseContext,
    guard: &mut ErrorGuard,
) -> Result<MnemonicMap> {
    rptsched_normaliser()?.normalise(keyword, &MnemonicMap::new(), ctx, guard)
}

/// Normalises an `RPTSCHED` keyword on top of `previous`, honouring
/// `NOTHING`.
///
/// Every item is validated. If `NOTHING` is present, `previous` and every
/// entry up to the first `NOTHING` are dropped. Returns whether that
/// happened together with the resulting map.
///
/// # Errors
///
/// Fails when a diagnostic is fatal under `ctx`.
pub fn normalise_after_nothing(
    keyword: &DeckKeyword,
    previous: &MnemonicMap,
    ctx: &ParseContext,
    guard: &mut ErrorGuard,
) -> Result<(bool, MnemonicMap)> {
    rptsched_normaliser()?.normalise_with_reset(
        &keyword.tokens(),
        keyword.location(),
        previous,
        NOTHING,
        ctx,
        guard,
    )
}
