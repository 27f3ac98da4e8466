mod common;

use std::cell::RefCell;

use common::candidates_body;
use lexprompt::{
    AiExecutionError, AiGateway, Attachment, GatewayConfig, HttpGeminiClient, JURISDICTION_PREAMBLE,
    LegalArea, PromptGateway, PromptImproveError, WorkflowController, WorkflowPhase,
};
use mockito::Matcher;
use url::Url;

/// Gateway double recording calls and answering from fixed results.
struct ScriptedGateway {
    improve: Result<String, PromptImproveError>,
    execute: Result<String, AiExecutionError>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedGateway {
    fn new(
        improve: Result<String, PromptImproveError>,
        execute: Result<String, AiExecutionError>,
    ) -> Self {
        Self { improve, execute, calls: RefCell::new(vec![]) }
    }
}

impl PromptGateway for ScriptedGateway {
    fn improve(&self, prompt: &str) -> Result<String, PromptImproveError> {
        self.calls.borrow_mut().push(format!("improve:{}", prompt.len()));
        self.improve.clone()
    }

    fn execute(
        &self,
        _prompt: &str,
        attachments: &[Attachment],
    ) -> Result<String, AiExecutionError> {
        self.calls.borrow_mut().push(format!("execute:{}", attachments.len()));
        self.execute.clone()
    }
}

fn filled_controller() -> WorkflowController {
    let mut controller = WorkflowController::new();
    controller.select_area(LegalArea::Laboral);
    controller.set_task("Calcular finiquito");
    controller.set_context("Despido injustificado tras 4 años");
    controller
}

#[test]
fn full_session_walks_through_every_phase() {
    let gateway = ScriptedGateway::new(
        Ok(format!("{}\n\nRol=R2", JURISDICTION_PREAMBLE)),
        Ok("**Finiquito**: ...".to_string()),
    );
    let mut controller = WorkflowController::new();
    assert_eq!(controller.phase(), WorkflowPhase::Idle);

    controller.set_task("Calcular finiquito");
    controller.set_context("Despido");
    assert_eq!(controller.phase(), WorkflowPhase::Ready);

    assert!(controller.improve(&gateway));
    assert!(controller.prompt().ends_with("Rol=R2"));

    assert!(controller.execute(&gateway));
    assert_eq!(controller.phase(), WorkflowPhase::Displayed);

    controller.toggle_response_edit();
    assert_eq!(controller.phase(), WorkflowPhase::Editing);
    assert!(controller.edit_response("Finiquito corregido"));
    assert_eq!(controller.export_response().contents, "Finiquito corregido");

    assert_eq!(gateway.calls.borrow().len(), 2);
}

#[test]
fn busy_controller_rejects_instead_of_queueing() {
    let gateway = ScriptedGateway::new(Ok("x".to_string()), Ok("y".to_string()));
    let mut controller = filled_controller();

    let ticket = controller.begin_execute().expect("execute should start");
    assert!(!controller.improve(&gateway));
    assert!(!controller.execute(&gateway));
    assert!(gateway.calls.borrow().is_empty());

    controller.complete_execute(ticket, Ok("respuesta".to_string()));
    assert_eq!(controller.response(), "respuesta");
    assert!(gateway.calls.borrow().is_empty());
}

#[test]
fn execute_failure_is_recoverable() {
    let failing = ScriptedGateway::new(
        Err(PromptImproveError::new("down")),
        Err(AiExecutionError::new("down")),
    );
    let working = ScriptedGateway::new(Ok("x".to_string()), Ok("respuesta".to_string()));
    let mut controller = filled_controller();

    controller.execute(&failing);
    assert_eq!(controller.response(), "");
    assert!(controller.error().is_some_and(|e| e.contains("No se pudo obtener una respuesta")));
    assert!(!controller.state().is_response_editable);

    controller.execute(&working);
    assert_eq!(controller.response(), "respuesta");
    assert_eq!(controller.error(), None);
}

#[test]
fn http_gateway_round_trip_through_controller() {
    let mut server = mockito::Server::new();
    let improve_mock = server
        .mock("POST", "/models/test-model:generateContent")
        .match_body(Matcher::Regex("PROMPT MEJORADO:".to_string()))
        .with_status(200)
        .with_body(candidates_body("Rol=Laboralista\nTarea=Calcular finiquito y liquidación"))
        .expect(1)
        .create();
    let execute_mock = server
        .mock("POST", "/models/test-model:generateContent")
        .match_body(Matcher::Regex("Tarea=Calcular finiquito y liquidaci".to_string()))
        .with_status(200)
        .with_body(candidates_body("Liquidación estimada"))
        .expect(1)
        .create();

    let config = GatewayConfig {
        api_base: Url::parse(&server.url()).unwrap(),
        model: "test-model".to_string(),
        timeout_secs: 5,
    };
    let gateway = AiGateway::new(HttpGeminiClient::new("test-key".to_string(), &config).unwrap());
    let mut controller = filled_controller();
    controller.add_attachment(Attachment::new("nota.pdf", "application/pdf", b"%PDF".to_vec()));

    controller.improve(&gateway);
    assert_eq!(
        controller.prompt(),
        format!(
            "{}\n\nRol=Laboralista\nTarea=Calcular finiquito y liquidación",
            JURISDICTION_PREAMBLE
        )
    );

    controller.execute(&gateway);
    assert_eq!(controller.response(), "Liquidación estimada");

    improve_mock.assert();
    execute_mock.assert();
}
