use crate::api::ServerConfiguration;
use crate::upload::selection::SelectedFile;

/// Verdict on whether the current file may be uploaded under the current limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admissibility {
    NoConfiguration,
    NoFile,
    TooLarge { size_bytes: u64, body_max_size: u64 },
    Admissible,
}

impl Admissibility {
    pub fn is_admissible(&self) -> bool {
        matches!(self, Admissibility::Admissible)
    }
}

/// Recomputed from both inputs on every call; nothing is cached.
pub fn evaluate(
    configuration: Option<&ServerConfiguration>,
    file: Option<&SelectedFile>,
) -> Admissibility {
    let Some(configuration) = configuration else {
        return Admissibility::NoConfiguration;
    };
    let Some(file) = file else {
        return Admissibility::NoFile;
    };

    if file.size_bytes <= configuration.body_max_size {
        Admissibility::Admissible
    } else {
        Admissibility::TooLarge {
            size_bytes: file.size_bytes,
            body_max_size: configuration.body_max_size,
        }
    }
}
