//! Fixed unit-conversion table shared by every force-field kernel.
//!
//! Every kernel computes in SI-derived units internally and converts to
//! the engine's native units (energy in kJ·mol⁻¹, force in Da·Å·fs⁻²)
//! through the constants below. These are derived once, here, from
//! standard physical constants, rather than sprinkled as unexplained
//! literals through the kernels.

/// Pi, in double precision (kernels that need it accumulate in `f64`
/// before narrowing the final result to `f32`).
pub const PI: f64 = std::f64::consts::PI;

/// Coulomb's constant, `1/(4*pi*eps0)`, in `N*m^2*C^-2`.
pub const COULOMB_CONSTANT: f64 = 8.9875517873681764e9;

/// Avogadro's number, `mol^-1`.
pub const AVOGADRO_NUMBER: f64 = 6.02214076e23;

/// Elementary charge, in Coulomb.
pub const ELEMENTARY_CHARGE_COULOMB: f64 = 1.602176634e-19;

/// Boltzmann's constant, in `J*K^-1`.
pub const BOLTZMANN_J_PER_K: f64 = 1.380649e-23;

/// One angstrom, in meters.
pub const ANGSTROM_TO_METER: f64 = 1e-10;

/// One joule, in kilojoules.
pub const JOULE_TO_KJOULE: f64 = 1e-3;

/// One dalton, in kilograms (unified atomic mass unit).
const DALTON_TO_KG: f64 = 1.66053906892e-27;

/// `1 N = NEWTON_TO_DA_ANGSTROM_PER_FS2 Da*A*fs^-2`.
///
/// Derived dimensionally: `1 kg = 1/DALTON_TO_KG Da`, `1 m = 1e10 A`,
/// `1 s^-2 = 1e-30 fs^-2` (since `1 s = 1e15 fs`). Multiplying the three
/// factors gives the conversion below.
pub const NEWTON_TO_DA_ANGSTROM_PER_FS2: f64 = (1.0 / DALTON_TO_KG) * 1e10 * 1e-30;

/// Minimal pairwise distance (in Angstrom) below which the Coulomb
/// kernel returns zero energy and force rather than diverging.
pub const MINIMAL_DISTANCE_ELECTROSTATIC_CUTOFF: f32 = 1e-3;

/// Minimal pairwise distance (in Angstrom) below which the steric
/// kernels return zero energy and force.
pub const MINIMAL_DISTANCE_STERIC_CUTOFF: f32 = 1e-3;

/// Converts a force expressed in `kJ*mol^-1*A^-1` to the engine's native
/// `Da*A*fs^-2`, used by the spring and steric kernels.
pub const GLOBAL_SPRING_FORCE_CONVERT: f32 = CONVERT_KJMOL_A_TO_DA_A_FS2 as f32;

/// `kJ*mol^-1*A^-1 -> N`: one `kJ/mol` is `1000/Avogadro` joules per
/// particle; dividing by one angstrom (in meters) gives newtons; then
/// [`NEWTON_TO_DA_ANGSTROM_PER_FS2`] finishes the conversion to the
/// engine's native force unit.
const CONVERT_KJMOL_A_TO_DA_A_FS2: f64 =
    (1e3 / AVOGADRO_NUMBER / ANGSTROM_TO_METER) * NEWTON_TO_DA_ANGSTROM_PER_FS2;

/// Force conversion used by the Coulomb kernel: its force module is
/// derived directly in Newtons from charges in Coulomb and distance in
/// meters, so it only needs the Newton -> native conversion.
pub const GLOBAL_ELECTROSTATIC_FORCE_CONVERT: f32 = NEWTON_TO_DA_ANGSTROM_PER_FS2 as f32;

/// Force conversion used by the IMPALA kernel: its raw force magnitude
/// is derived in the same `kJ*mol^-1*A^-1` unit as the spring/steric
/// kernels.
pub const GLOBAL_IMP_FORCE_CONVERT: f32 = CONVERT_KJMOL_A_TO_DA_A_FS2 as f32;

/// Scale applied to the whole [`crate::grid::potential::PotentialGrid`]
/// gradient field: `-k_B * (A-per-m) * (N-to-Da.A.fs^-2)`.
pub const POTENTIAL_GRID_GRADIENT_SCALE: f64 =
    -BOLTZMANN_J_PER_K * (1.0 / ANGSTROM_TO_METER) * NEWTON_TO_DA_ANGSTROM_PER_FS2;
