use serde::Serialize;

/// Prefix of every generated coordinate file name.
pub const FILE_PREFIX: &str = "POSCAR";

/// Formats `value` rounded to `decimals` places the way a shortest float repr would,
/// with the decimal point replaced by `p` (`2.40 -> "2p4"`, `2.0 -> "2p0"`).
pub fn decimal_tag(value: f64, decimals: i32) -> String {
    let scale = 10f64.powi(decimals);
    let rounded = (value * scale).round() / scale;
    let mut text = format!("{}", rounded);
    if !text.contains('.') {
        text.push_str(".0");
    }
    text.replace('.', "p")
}

/// The dominant size parameter encoded in titles and file names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SizeLabel {
    /// Mass density in g/cm³ (cuboid and sphere).
    Density(f64),
    /// Tube radius in Å and height/diameter ratio (cylinder).
    Tube { radius: f64, aspect_ratio: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StructureLabel {
    pub num_atoms: usize,
    pub size: SizeLabel,
}

impl StructureLabel {
    pub fn new(num_atoms: usize, size: SizeLabel) -> Self {
        Self { num_atoms, size }
    }

    /// The first line of the coordinate file.
    pub fn title(&self) -> String {
        match self.size {
            SizeLabel::Density(density) => {
                format!("{}atoms {}gcc", self.num_atoms, decimal_tag(density, 2))
            }
            SizeLabel::Tube {
                radius,
                aspect_ratio,
            } => format!(
                "{}atoms Radius: {}A Aspect-ratio: {}",
                self.num_atoms,
                decimal_tag(radius, 1),
                decimal_tag(aspect_ratio, 2)
            ),
        }
    }

    /// `POSCAR_1000atoms_2p44gcc` or `POSCAR_1000atoms_7p5A_1p3aspect_ratio`.
    pub fn file_name(&self) -> String {
        match self.size {
            SizeLabel::Density(density) => format!(
                "{}_{}atoms_{}gcc",
                FILE_PREFIX,
                self.num_atoms,
                decimal_tag(density, 2)
            ),
            SizeLabel::Tube {
                radius,
                aspect_ratio,
            } => format!(
                "{}_{}atoms_{}A_{}aspect_ratio",
                FILE_PREFIX,
                self.num_atoms,
                decimal_tag(radius, 1),
                decimal_tag(aspect_ratio, 2)
            ),
        }
    }
}
