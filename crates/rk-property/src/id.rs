//! Attribute identifiers and the static binding table

use rk_model::Inertial;

/// Inertial attribute of a joint exposed as a double-valued property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JointPropertyId {
    /// Mass (kg)
    Mass,
    /// Center of mass, x (m)
    ComX,
    /// Center of mass, y (m)
    ComY,
    /// Center of mass, z (m)
    ComZ,
    /// Inertia tensor, xx
    InertiaXx,
    /// Inertia tensor, yy
    InertiaYy,
    /// Inertia tensor, zz
    InertiaZz,
    /// Inertia tensor, xy
    InertiaXy,
    /// Inertia tensor, xz
    InertiaXz,
    /// Inertia tensor, yz
    InertiaYz,
}

/// `(attribute, numeric id, string id)`, in property list order
const PROPERTY_TABLE: [(JointPropertyId, u32, &str); 10] = [
    (JointPropertyId::Mass, 1001, "MASS"),
    (JointPropertyId::ComX, 1002, "COM_X"),
    (JointPropertyId::ComY, 1003, "COM_Y"),
    (JointPropertyId::ComZ, 1004, "COM_Z"),
    (JointPropertyId::InertiaXx, 1005, "INERTIA_MATRIX_XX"),
    (JointPropertyId::InertiaYy, 1006, "INERTIA_MATRIX_YY"),
    (JointPropertyId::InertiaZz, 1007, "INERTIA_MATRIX_ZZ"),
    (JointPropertyId::InertiaXy, 1008, "INERTIA_MATRIX_XY"),
    (JointPropertyId::InertiaXz, 1009, "INERTIA_MATRIX_XZ"),
    (JointPropertyId::InertiaYz, 1010, "INERTIA_MATRIX_YZ"),
];

impl JointPropertyId {
    /// All attributes, in property list order
    pub fn all() -> [JointPropertyId; 10] {
        PROPERTY_TABLE.map(|(id, _, _)| id)
    }

    fn entry(self) -> (JointPropertyId, u32, &'static str) {
        // The table is indexed by declaration order
        PROPERTY_TABLE[self as usize]
    }

    /// Stable numeric identifier
    pub fn numeric_id(self) -> u32 {
        self.entry().1
    }

    /// Stable string identifier
    pub fn string_id(self) -> &'static str {
        self.entry().2
    }

    /// Look up an attribute by its string identifier
    pub fn from_string_id(name: &str) -> Option<Self> {
        PROPERTY_TABLE
            .iter()
            .find(|(_, _, string_id)| *string_id == name)
            .map(|(id, _, _)| *id)
    }

    /// Look up an attribute by its numeric identifier
    pub fn from_numeric_id(numeric_id: u32) -> Option<Self> {
        PROPERTY_TABLE
            .iter()
            .find(|(_, n, _)| *n == numeric_id)
            .map(|(id, _, _)| *id)
    }

    /// Read this attribute from inertial parameters
    pub fn read(self, inertial: &Inertial) -> f64 {
        match self {
            JointPropertyId::Mass => inertial.mass,
            JointPropertyId::ComX => inertial.com.x,
            JointPropertyId::ComY => inertial.com.y,
            JointPropertyId::ComZ => inertial.com.z,
            JointPropertyId::InertiaXx => inertial.inertia.ixx,
            JointPropertyId::InertiaYy => inertial.inertia.iyy,
            JointPropertyId::InertiaZz => inertial.inertia.izz,
            JointPropertyId::InertiaXy => inertial.inertia.ixy,
            JointPropertyId::InertiaXz => inertial.inertia.ixz,
            JointPropertyId::InertiaYz => inertial.inertia.iyz,
        }
    }

    /// Write this attribute into inertial parameters
    pub fn write(self, inertial: &mut Inertial, value: f64) {
        let slot = match self {
            JointPropertyId::Mass => &mut inertial.mass,
            JointPropertyId::ComX => &mut inertial.com.x,
            JointPropertyId::ComY => &mut inertial.com.y,
            JointPropertyId::ComZ => &mut inertial.com.z,
            JointPropertyId::InertiaXx => &mut inertial.inertia.ixx,
            JointPropertyId::InertiaYy => &mut inertial.inertia.iyy,
            JointPropertyId::InertiaZz => &mut inertial.inertia.izz,
            JointPropertyId::InertiaXy => &mut inertial.inertia.ixy,
            JointPropertyId::InertiaXz => &mut inertial.inertia.ixz,
            JointPropertyId::InertiaYz => &mut inertial.inertia.iyz,
        };
        *slot = value;
    }
}
