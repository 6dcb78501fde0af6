// kf-core/src/units.rs

use uom::si::f64::{
    AmountOfSubstance as UomAmount, MolarConcentration as UomMolarConcentration,
    Pressure as UomPressure, ThermodynamicTemperature as UomThermodynamicTemperature,
    Time as UomTime, Volume as UomVolume,
};

// Public canonical unit types (SI, f64)
pub type Amount = UomAmount;
pub type Concentration = UomMolarConcentration;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;
pub type Time = UomTime;
pub type Volume = UomVolume;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn bar(v: f64) -> Pressure {
    use uom::si::pressure::bar;
    Pressure::new::<bar>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn m3(v: f64) -> Volume {
    use uom::si::volume::cubic_meter;
    Volume::new::<cubic_meter>(v)
}

#[inline]
pub fn mol(v: f64) -> Amount {
    use uom::si::amount_of_substance::mole;
    Amount::new::<mole>(v)
}

#[inline]
pub fn mol_per_m3(v: f64) -> Concentration {
    use uom::si::molar_concentration::mole_per_cubic_meter;
    Concentration::new::<mole_per_cubic_meter>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

pub mod constants {
    /// Molar gas constant [J/(mol·K)].
    pub const R_J_PER_MOL_K: f64 = 8.314_472;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _p = pa(101_325.0);
        let _t = k(300.0);
        let _v = m3(1.0);
        let _n = mol(2.0);
        let _c = mol_per_m3(0.5);
        let _dt = s(0.1);
    }

    #[test]
    fn bar_is_1e5_pascal() {
        assert!((bar(1.0).value - 1.0e5).abs() < 1e-9);
    }
}
