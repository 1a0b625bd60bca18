use std::fmt::Display;

/// The four requestable identifier length classes, shortest to longest.
///
/// The set is closed: every requestable length is a variant, so an invalid
/// length request is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LengthClass {
    VeryShort,
    Short,
    Medium,
    VeryLong,
}

impl LengthClass {
    /// Every class, ordered shortest to longest.
    pub const ALL: [LengthClass; 4] = [
        LengthClass::VeryShort,
        LengthClass::Short,
        LengthClass::Medium,
        LengthClass::VeryLong,
    ];

    /// The next longer class, or `None` for [`LengthClass::VeryLong`].
    pub fn next_longer(self) -> Option<LengthClass> {
        match self {
            LengthClass::VeryShort => Some(LengthClass::Short),
            LengthClass::Short => Some(LengthClass::Medium),
            LengthClass::Medium => Some(LengthClass::VeryLong),
            LengthClass::VeryLong => None,
        }
    }
}

impl Display for LengthClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LengthClass::VeryShort => "very-short",
            LengthClass::Short => "short",
            LengthClass::Medium => "medium",
            LengthClass::VeryLong => "very-long",
        };
        f.write_str(name)
    }
}
