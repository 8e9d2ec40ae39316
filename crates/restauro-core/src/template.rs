//! The canonical workflow shipped with this version of the application.
//!
//! Changing a step or task identifier here is the only sanctioned way to
//! evolve the workflow. Reconciliation matches persisted progress by
//! identifier, so renamed or removed entries simply lose their stored flag.

use crate::models::{ActionKind, Step, Task, Visualization};

/// Storage key under which the progress snapshot is kept.
pub const STORAGE_KEY: &str = "central_v4";

/// Builds the workflow template with every task pending.
pub fn initial_workflow() -> Vec<Step> {
    vec![standardize_step(), comfyui_step(), render_step()]
}

fn standardize_step() -> Step {
    Step {
        id: "step1".to_string(),
        title: "Passo 1: Padronização Híbrida".to_string(),
        description: "Seletor inteligente: Analógico (Desentrelaça) vs Digital (Otimiza).".to_string(),
        icon: "cpu".to_string(),
        color: "bg-blue-600".to_string(),
        text_color: "text-blue-300".to_string(),
        badge: Some("ATUALIZADO v6.0".to_string()),
        visual: Visualization::None,
        tasks: vec![
            Task::new(
                "dl_script",
                "1. Descarregar \"Engenheiro de Video v6.0\"",
                "Pasta do Projeto",
                "Script atualizado. Ao executar, digite \"2\" para o seu arquivo \"SANTA CATARINA.mp4\" (Progressivo).",
            )
            .with_location_color("bg-blue-600")
            .with_action(ActionKind::Download, "BAIXAR SCRIPT HÍBRIDO v6.0")
            .with_technical_note(
                "v6.0: Adicionado menu de seleção. Modo 2 evita filtros destrutivos em mídia digital.",
            ),
            Task::new(
                "run_script",
                "2. Processar Arquivo",
                "CMD / Explorer",
                "Arraste o vídeo para o .bat e escolha a opção correta no menu preto que abrir.",
            )
            .with_location_color("bg-slate-600"),
        ],
    }
}

fn comfyui_step() -> Step {
    Step {
        id: "step2".to_string(),
        title: "Passo 2: Configurar ComfyUI".to_string(),
        description: "Instalação do Workflow Wan2.1 base.".to_string(),
        icon: "settings".to_string(),
        color: "bg-purple-500".to_string(),
        text_color: "text-purple-400".to_string(),
        badge: None,
        visual: Visualization::None,
        tasks: vec![
            Task::new(
                "dl_json",
                "1. Descarregar Workflow (.json)",
                "Pasta de Transferências",
                "Estrutura de nós otimizada para Upscale 4x.",
            )
            .with_location_color("bg-blue-500")
            .with_action(ActionKind::Download, "DESCARREGAR JSON")
            .with_technical_note(
                "Workflow padrão (UpscaleModelLoader -> ImageUpscaleWithModel).",
            ),
            Task::new(
                "load_json",
                "2. Importar no ComfyUI",
                "Janela do ComfyUI",
                "Arraste o JSON para a interface.",
            )
            .with_location_color("bg-purple-500"),
            Task::new(
                "install_missing",
                "3. Instalar Dependências",
                "ComfyUI Manager",
                "Use o Manager para instalar nós faltantes (VHS Video Helper, etc).",
            )
            .with_location_color("bg-red-500"),
        ],
    }
}

fn render_step() -> Step {
    Step {
        id: "step3".to_string(),
        title: "Passo 3: Renderização Final".to_string(),
        description: "Upscale 4x (Resultante: ~1440p)".to_string(),
        icon: "play".to_string(),
        color: "bg-emerald-500".to_string(),
        text_color: "text-emerald-400".to_string(),
        badge: None,
        visual: Visualization::WorkflowDiagram,
        tasks: vec![
            Task::new(
                "select_video",
                "1. Carregar Vídeo Otimizado",
                "Nó VHS Load Video",
                "Selecione o arquivo da pasta \"pronto_para_ai\" (terminado em _optimized_progressive.mp4).",
            )
            .with_location_color("bg-orange-500"),
            Task::new(
                "queue",
                "2. Iniciar Processamento",
                "Queue Prompt",
                "O modelo Remacri vai multiplicar sua resolução de 490x360 por 4x (1960x1440).",
            )
            .with_location_color("bg-emerald-600"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_template_starts_pending() {
        let steps = initial_workflow();
        assert!(steps.iter().flat_map(|s| &s.tasks).all(|t| !t.done));
    }

    #[test]
    fn test_step_ids_are_unique() {
        let steps = initial_workflow();
        let ids: HashSet<_> = steps.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), steps.len());
    }

    #[test]
    fn test_task_ids_unique_within_step() {
        for step in initial_workflow() {
            let ids: HashSet<_> = step.tasks.iter().map(|t| t.id.as_str()).collect();
            assert_eq!(ids.len(), step.tasks.len(), "duplicate task id in {}", step.id);
        }
    }

    #[test]
    fn test_template_shape() {
        let steps = initial_workflow();
        let counts: Vec<usize> = steps.iter().map(|s| s.tasks.len()).collect();
        assert_eq!(counts, vec![2, 3, 2]);
        assert_eq!(steps[2].visual, Visualization::WorkflowDiagram);
    }

    #[test]
    fn test_download_tasks_carry_actions() {
        let steps = initial_workflow();
        let with_action: Vec<&str> = steps
            .iter()
            .flat_map(|s| &s.tasks)
            .filter(|t| t.action.is_some())
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(with_action, vec!["dl_script", "dl_json"]);
    }
}
