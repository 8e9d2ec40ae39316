//! Static reference guide: prerequisites and tuning tables.

/// Markdown text of the guide.
pub const GUIDE: &str = include_str!("../assets/guide.md");

/// Things that must be installed before the first step.
pub const PREREQUISITES: [(&str, &str); 2] = [
    (
        "FFmpeg Instalado",
        "Necessário para o script .bat funcionar no Windows.",
    ),
    (
        "ComfyUI Operacional",
        "Instalado e a abrir sem erros no localhost.",
    ),
];
