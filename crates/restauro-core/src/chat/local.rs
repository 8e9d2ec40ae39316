//! Offline keyword responder.

use std::time::Duration;

use futures::stream::{self, StreamExt};

use super::{ChatRequest, ReplyStream, ResponseSource};

/// Canned answer selected by keyword.
#[derive(Debug, Clone, Copy)]
pub struct OfflineGuide {
    /// Lower-case substrings that select this guide
    pub keywords: &'static [&'static str],
    pub response: &'static str,
}

/// Offline guides, checked in order. The first match wins.
pub const OFFLINE_GUIDES: &[OfflineGuide] = &[
    OfflineGuide {
        keywords: &["ffmpeg", "bitrate", "encode", "h264", "h.264"],
        response: "Fluxo de encode FFmpeg enxuto:
- Remux rápido: ffmpeg -i input.mov -c copy output.mkv
- H.264 equilibrado: ffmpeg -i input.mov -c:v libx264 -preset slow -crf 18 -pix_fmt yuv420p -c:a copy out.mp4
- Forçar bitrate alvo: use -maxrate e -bufsize (ex.: -maxrate 12M -bufsize 24M) para segurar picos em upload.",
    },
    OfflineGuide {
        keywords: &["bwdif", "deinterlace", "interlaced", "entrelaçado"],
        response: "Deinterlacing seguro (bwdif):
- Com detecção automática: ffmpeg -i input.mov -vf bwdif=mode=send_field:parity=auto:deint=all -c:a copy out.mp4
- Se o material for sempre entrelaçado, fixe parity=top ou bottom.
- Ao exportar para upscaling, mantenha -preset medium e -crf 17 para preservar detalhes.",
    },
    OfflineGuide {
        keywords: &["upscale", "upscaling", "superscale", "topaz", "4k"],
        response: "Pipeline de upscale sugerido:
1) Limpe e deinterlace primeiro (bwdif) para evitar duplicar artefatos.
2) Gere intermediário de alta qualidade (ProRes 422 HQ ou H.264 crf 16).
3) Use o modelo de upscale com redução de ruído moderada (denoise médio) para MiniDV.
4) Finalize em H.265 (crf 18, preset slow) ou entregue ProRes se houver edição posterior.",
    },
    OfflineGuide {
        keywords: &["gpu", "vram", "rtx", "3060", "placa"],
        response: "Gerenciamento de VRAM (referência RTX 3060 12 GB):
- Carga segura para AI: lotes pequenos (1–2) e latente máx. 12 para evitar swap.
- Em vídeo: prefira codificar via CPU (libx264) quando o pipeline de IA estiver ativo.
- Monitore memórias: evite abrir múltiplas pré-visualizações 4K simultâneas.",
    },
    OfflineGuide {
        keywords: &["comfyui", "workflow", "nó", "nodes", "comfy"],
        response: "Boas práticas no ComfyUI:
- Padronize resoluções de entrada e saída para evitar reescalações internas.
- Agrupe nós em blocos lógicos (preprocessamento, inferência, pós) e salve presets.
- Use checkpointers e VAE compatíveis; carregue VAE apenas uma vez por sessão para economizar VRAM.
- Logue parâmetros chave (seed, steps, sampler) junto do output final para reprodutibilidade.",
    },
];

const FALLBACK_RESPONSE: &str = "Assistente offline ativo.
Posso ajudar com:
- FFmpeg (bitrate, CRF, deinterlace bwdif)
- Sequência de restauração (limpeza, upscale, encode)
- Regras rápidas para ComfyUI e gestão de VRAM
Envie termos-chave para receber um roteiro curto.";

const FALLBACK_HINT: &str = "Dica imediata: especifique se precisa de comando (ex.: \"ffmpeg 1080p\") ou otimização de hardware.";

/// Suggested questions offered to the user.
pub const QUICK_PROMPTS: &[&str] = &[
    "Comando FFmpeg para exportar em 1080p com qualidade alta",
    "Como evitar estouro de VRAM na RTX 3060 enquanto processo IA",
    "Passo a passo para restaurar fita VHS no ComfyUI",
    "Qual preset de encode usar para subir vídeo no YouTube",
    "Fluxo de limpeza + upscale antes de exportar em H.265",
];

/// Picks the offline answer for `prompt`.
///
/// ```
/// use restauro_core::chat::offline_answer;
///
/// assert!(offline_answer("Como usar FFMPEG?").contains("libx264"));
/// assert!(offline_answer("olá").starts_with("Assistente offline ativo."));
/// ```
pub fn offline_answer(prompt: &str) -> String {
    let normalized = prompt.to_lowercase();
    OFFLINE_GUIDES
        .iter()
        .find(|guide| guide.keywords.iter().any(|key| normalized.contains(key)))
        .map(|guide| guide.response.to_string())
        .unwrap_or_else(|| format!("{FALLBACK_RESPONSE}\n\n{FALLBACK_HINT}"))
}

/// Answers from [`OFFLINE_GUIDES`] after a short simulated delay.
#[derive(Debug, Clone)]
pub struct LocalResponder {
    latency: Duration,
}

impl LocalResponder {
    pub const DEFAULT_LATENCY: Duration = Duration::from_millis(150);

    pub fn new() -> Self {
        Self {
            latency: Self::DEFAULT_LATENCY,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

impl Default for LocalResponder {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseSource for LocalResponder {
    fn label(&self) -> &str {
        "offline guide"
    }

    fn respond(&self, request: ChatRequest) -> ReplyStream {
        let latency = self.latency;
        let prompt = request.last_user_text().unwrap_or_default().to_string();
        stream::once(async move {
            tokio::time::sleep(latency).await;
            Ok(offline_answer(&prompt))
        })
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{ChatSession, ChatState};

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        assert_eq!(offline_answer("BWDIF ou yadif?"), OFFLINE_GUIDES[1].response);
        assert_eq!(offline_answer("Quanta VRAM?"), OFFLINE_GUIDES[3].response);
    }

    #[test]
    fn test_first_matching_guide_wins() {
        // "encode" (ffmpeg guide) and "comfyui" both match; ffmpeg is listed first.
        assert_eq!(
            offline_answer("encode no comfyui"),
            OFFLINE_GUIDES[0].response
        );
    }

    #[test]
    fn test_unmatched_prompt_gets_fallback_with_hint() {
        let answer = offline_answer("bom dia");
        assert!(answer.starts_with(FALLBACK_RESPONSE));
        assert!(answer.ends_with(FALLBACK_HINT));
    }

    #[test]
    fn test_every_quick_prompt_has_an_answer() {
        for prompt in QUICK_PROMPTS {
            assert!(!offline_answer(prompt).is_empty());
        }
    }

    #[tokio::test]
    async fn test_local_turn_completes_session() {
        let responder = LocalResponder::new().with_latency(Duration::ZERO);
        let mut session = ChatSession::new();

        assert!(session.ask("como usar ffmpeg?", &responder).await);

        assert_eq!(session.state(), ChatState::Idle);
        let last = session.trailing().expect("answer");
        assert!(last.content.contains("libx264"));
        assert_eq!(session.messages().len(), 3);
    }

    #[tokio::test]
    async fn test_local_answer_waits_for_latency() {
        let responder = LocalResponder::new().with_latency(Duration::from_millis(20));
        let started = std::time::Instant::now();
        let mut session = ChatSession::new();

        session.ask("vram", &responder).await;

        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
