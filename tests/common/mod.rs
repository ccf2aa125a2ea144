//! Helper condivisi dai test d'integrazione
//!
//! Avvia una finta API del salone (axum su 127.0.0.1:0) con uno store in memoria,
//! il registro delle richieste ricevute e gli interruttori per simulare i guasti.

#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post},
};
use chrono::{Duration, Local, NaiveDate, Utc};
use salon_booking::core::{AppState, Config};
use salon_booking::entities::{CurrentUser, Role};
use serde_json::{Value, json};
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tokio::net::TcpListener;

pub const PASSWORD: &str = "Segredo@1";
pub const CLIENT_ID: i32 = 3;
pub const EMPLOYEE_ID: i32 = 10;
pub const MANAGER_ID: i32 = 1;
pub const SERVICE_ID: i32 = 1;

type Shared = Arc<Mutex<Store>>;

/// Stato della finta API
#[derive(Default)]
pub struct Store {
    pub users: Vec<Value>,
    pub employees: Vec<Value>,
    pub services: Vec<Value>,
    pub categories: Vec<Value>,
    pub validation_codes: Vec<Value>,
    pub appointments: BTreeMap<i32, Value>,
    /// id del carrello -> id del cliente
    pub carts: BTreeMap<i32, i32>,
    pub next_id: i32,
    /// "METODO /percorso" di ogni richiesta ricevuta
    pub requests: Vec<String>,
    pub fail_cart_attach: bool,
    pub fail_delete: bool,
    pub fail_updates: HashSet<i32>,
}

impl Store {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        100 + self.next_id
    }

    /// Inserisce un appuntamento già esistente
    pub fn insert_appointment(
        &mut self,
        id: i32,
        client_id: i32,
        status: &str,
        cart_id: Option<i32>,
    ) -> Value {
        let appointment = json!({
            "id": id,
            "date": tomorrow().format("%Y-%m-%d").to_string(),
            "hour": "10:00",
            "status": status,
            "serviceId": SERVICE_ID,
            "employeeId": EMPLOYEE_ID,
            "clientId": client_id,
            "cartId": cart_id,
            "service": self.service(SERVICE_ID),
        });
        self.appointments.insert(id, appointment.clone());
        appointment
    }

    fn service(&self, id: i32) -> Value {
        self.services
            .iter()
            .find(|s| s["id"] == id)
            .cloned()
            .unwrap_or(Value::Null)
    }

    fn cart_json(&self, cart_id: i32, client_id: i32) -> Value {
        let staged: Vec<Value> = self
            .appointments
            .values()
            .filter(|a| a["cartId"] == cart_id)
            .cloned()
            .collect();
        json!({ "id": cart_id, "clientId": client_id, "appointment": staged })
    }

    fn attach(&mut self, cart_id: i32, appointment_id: i32) -> StatusCode {
        match self.appointments.get_mut(&appointment_id) {
            Some(appointment) => {
                appointment["cartId"] = json!(cart_id);
                StatusCode::OK
            }
            None => StatusCode::NOT_FOUND,
        }
    }
}

/// Un cliente, un funzionario con le 09:00 bloccate, un gerente e un servizio
pub fn seeded_store() -> Store {
    let ana = json!({
        "id": EMPLOYEE_ID,
        "username": "Ana",
        "email": "ana@salao.ao",
        "cellphone": "923000000",
        "availability": "09:00",
        "role": "EMPLOYEE"
    });
    let corte = json!({
        "id": SERVICE_ID,
        "name": "Corte",
        "description": "Corte de cabelo",
        "price": 1500,
        "duration": 60,
        "categoryId": 1,
        "employees": [ana.clone()]
    });

    Store {
        users: vec![
            json!({"id": CLIENT_ID, "username": "joana", "email": "joana@mail.ao", "cellphone": "923111222", "role": "CLIENT"}),
            json!({"id": EMPLOYEE_ID, "username": "Ana", "email": "ana@salao.ao", "cellphone": "923000000", "role": "EMPLOYEE"}),
            json!({"id": MANAGER_ID, "username": "gerente", "email": "gerente@salao.ao", "cellphone": "923999999", "role": "MANAGER"}),
        ],
        employees: vec![ana],
        services: vec![corte],
        categories: vec![json!({"id": 1, "name": "Cabelo", "description": "", "services": []})],
        ..Store::default()
    }
}

/// Finta API in esecuzione
pub struct FakeApi {
    pub base_url: String,
    store: Shared,
}

impl FakeApi {
    pub fn with_store<R>(&self, f: impl FnOnce(&mut Store) -> R) -> R {
        f(&mut self.store.lock().unwrap())
    }

    pub fn requests(&self) -> Vec<String> {
        self.with_store(|s| s.requests.clone())
    }

    /// Richieste ricevute il cui testo contiene `fragment`
    pub fn count_requests(&self, fragment: &str) -> usize {
        self.requests()
            .iter()
            .filter(|line| line.contains(fragment))
            .count()
    }

    pub fn appointment(&self, id: i32) -> Option<Value> {
        self.with_store(|s| s.appointments.get(&id).cloned())
    }
}

/// Stato dell'applicazione puntato sulla finta API, con il file di sessione in una
/// directory temporanea che vive quanto il contesto
pub struct TestContext {
    pub api: FakeApi,
    pub state: AppState,
    pub dir: TempDir,
}

pub async fn setup(store: Store) -> TestContext {
    let api = spawn_fake_api(store).await;
    let dir = TempDir::new().expect("Failed to create temp dir");
    let state = create_test_state(&api, &dir);
    TestContext { api, state, dir }
}

pub fn create_test_state(api: &FakeApi, dir: &TempDir) -> AppState {
    let config = Config::for_api(api.base_url.clone(), dir.path().join("session.json"));
    AppState::new(&config).expect("Failed to create app state")
}

pub async fn spawn_fake_api(store: Store) -> FakeApi {
    let shared: Shared = Arc::new(Mutex::new(store));
    let app = router(shared.clone());

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake api");
    let addr = listener.local_addr().expect("Missing local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Fake api crashed");
    });

    FakeApi {
        base_url: format!("http://{}", addr),
        store: shared,
    }
}

pub fn tomorrow() -> NaiveDate {
    Local::now().date_naive() + Duration::days(1)
}

pub fn user(id: i32, role: Role) -> CurrentUser {
    CurrentUser {
        id,
        username: format!("user{}", id),
        email: format!("user{}@mail.ao", id),
        cellphone: "923000111".into(),
        role,
        academic_level_id: None,
    }
}

pub fn client() -> CurrentUser {
    user(CLIENT_ID, Role::Client)
}

pub fn employee() -> CurrentUser {
    user(EMPLOYEE_ID, Role::Employee)
}

pub fn manager() -> CurrentUser {
    user(MANAGER_ID, Role::Manager)
}

/// Genera un JWT con scadenza `valid_for` a partire da adesso (negativa = già scaduto)
pub fn create_test_jwt(user_id: i32, valid_for: Duration) -> String {
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde::Serialize;

    #[derive(Serialize)]
    struct Claims {
        id: i32,
        exp: i64,
        iat: i64,
    }

    let now = Utc::now();
    let claims = Claims {
        id: user_id,
        exp: (now + valid_for).timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"segredo-da-api"),
    )
    .expect("Failed to create JWT token")
}

// ********************* FINTA API **********************//

fn router(shared: Shared) -> Router {
    Router::new()
        .route("/client/login", post(login))
        .route("/employee/login", post(login))
        .route("/client/getOneClient/{id}", get(get_user))
        .route("/employee/getOneEmployee/{id}", get(get_employee))
        .route("/employee/getAllEmployees", get(list_employees))
        .route("/client/updateInfoProfile/{id}", post(update_user))
        .route("/employee/updateInfoProfile/{id}", post(update_user))
        .route("/client/deleteClient/{id}", delete(delete_user))
        .route("/employee/deleteEmployee/{id}", delete(delete_user))
        .route("/service/getAllServices", get(list_services))
        .route("/service/getOneService/{id}", get(get_service))
        .route("/service/delete/{id}", delete(delete_service))
        .route("/category/getAllCategories", get(list_categories))
        .route("/category/create", post(create_category))
        .route(
            "/codeValidationToEmployee/getAllCodeValidations",
            get(list_validation_codes),
        )
        .route("/appointment/create", post(create_appointment))
        .route("/appointment/getAllAppointments", get(list_appointments))
        .route("/appointment/getOneAppointment/{id}", get(get_appointment))
        .route("/appointment/update/{id}", post(update_appointment))
        .route("/appointment/updateStatus/{id}", post(update_status))
        .route("/appointment/delete/{id}", delete(delete_appointment))
        .route("/cart/getCartByClientId/{id}", get(cart_by_client))
        .route("/cart/create", post(create_cart))
        .route("/cart/update/{id}", post(update_cart))
        .route("/cart/delete/{id}", delete(delete_cart))
        .layer(middleware::from_fn_with_state(shared.clone(), record))
        .with_state(shared)
}

async fn record(State(store): State<Shared>, request: Request, next: Next) -> Response {
    let line = format!("{} {}", request.method(), request.uri().path());
    store.lock().unwrap().requests.push(line);
    next.run(request).await
}

async fn login(State(store): State<Shared>, Json(body): Json<Value>) -> Result<Json<Value>, StatusCode> {
    let store = store.lock().unwrap();
    if body["password"] != PASSWORD {
        return Err(StatusCode::UNAUTHORIZED);
    }
    let user = store
        .users
        .iter()
        .find(|u| u["email"] == body["email"] && u["role"] == body["role"])
        .cloned()
        .ok_or(StatusCode::UNAUTHORIZED)?;
    let id = user["id"].as_i64().unwrap_or_default() as i32;

    Ok(Json(json!({ "user": user, "token": create_test_jwt(id, Duration::hours(1)) })))
}

async fn get_user(State(store): State<Shared>, Path(id): Path<i32>) -> Result<Json<Value>, StatusCode> {
    let store = store.lock().unwrap();
    let mut user = store
        .users
        .iter()
        .find(|u| u["id"] == id)
        .cloned()
        .ok_or(StatusCode::NOT_FOUND)?;
    user["appointments"] = store
        .appointments
        .values()
        .filter(|a| a["clientId"] == id)
        .cloned()
        .collect();
    Ok(Json(user))
}

async fn get_employee(State(store): State<Shared>, Path(id): Path<i32>) -> Result<Json<Value>, StatusCode> {
    let store = store.lock().unwrap();
    store
        .employees
        .iter()
        .find(|e| e["id"] == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_employees(State(store): State<Shared>) -> Json<Value> {
    Json(Value::from(store.lock().unwrap().employees.clone()))
}

async fn update_user(
    State(store): State<Shared>,
    Path(id): Path<i32>,
    Json(body): Json<Value>,
) -> StatusCode {
    let mut store = store.lock().unwrap();
    let Some(user) = store.users.iter_mut().find(|u| u["id"] == id) else {
        return StatusCode::NOT_FOUND;
    };
    for field in ["username", "email", "cellphone"] {
        if let Some(value) = body.get(field) {
            user[field] = value.clone();
        }
    }
    StatusCode::OK
}

async fn delete_user(State(store): State<Shared>, Path(id): Path<i32>) -> StatusCode {
    store.lock().unwrap().users.retain(|u| u["id"] != id);
    StatusCode::OK
}

async fn list_services(State(store): State<Shared>) -> Json<Value> {
    Json(Value::from(store.lock().unwrap().services.clone()))
}

async fn get_service(State(store): State<Shared>, Path(id): Path<i32>) -> Result<Json<Value>, StatusCode> {
    let store = store.lock().unwrap();
    match store.service(id) {
        Value::Null => Err(StatusCode::NOT_FOUND),
        service => Ok(Json(service)),
    }
}

async fn delete_service(State(store): State<Shared>, Path(id): Path<i32>) -> StatusCode {
    store.lock().unwrap().services.retain(|s| s["id"] != id);
    StatusCode::OK
}

async fn list_categories(State(store): State<Shared>) -> Json<Value> {
    Json(Value::from(store.lock().unwrap().categories.clone()))
}

async fn create_category(State(store): State<Shared>, Json(mut body): Json<Value>) -> Json<Value> {
    let mut store = store.lock().unwrap();
    body["id"] = json!(store.next_id());
    body["services"] = json!([]);
    store.categories.push(body.clone());
    Json(body)
}

async fn list_validation_codes(State(store): State<Shared>) -> Json<Value> {
    Json(Value::from(store.lock().unwrap().validation_codes.clone()))
}

async fn create_appointment(State(store): State<Shared>, Json(mut body): Json<Value>) -> Json<Value> {
    let mut store = store.lock().unwrap();
    let id = store.next_id();
    body["id"] = json!(id);
    body["cartId"] = Value::Null;
    let service_id = body["serviceId"].as_i64().unwrap_or_default() as i32;
    body["service"] = store.service(service_id);
    store.appointments.insert(id, body.clone());
    Json(body)
}

async fn list_appointments(State(store): State<Shared>) -> Json<Value> {
    let store = store.lock().unwrap();
    Json(store.appointments.values().cloned().collect())
}

async fn get_appointment(State(store): State<Shared>, Path(id): Path<i32>) -> Result<Json<Value>, StatusCode> {
    let store = store.lock().unwrap();
    store
        .appointments
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_appointment(
    State(store): State<Shared>,
    Path(id): Path<i32>,
    Json(body): Json<Value>,
) -> StatusCode {
    let mut store = store.lock().unwrap();
    if store.fail_updates.contains(&id) {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    let Some(appointment) = store.appointments.get_mut(&id) else {
        return StatusCode::NOT_FOUND;
    };
    for field in ["date", "hour", "employeeId", "cartId"] {
        if let Some(value) = body.get(field) {
            appointment[field] = value.clone();
        }
    }
    StatusCode::OK
}

async fn update_status(
    State(store): State<Shared>,
    Path(id): Path<i32>,
    Json(body): Json<Value>,
) -> StatusCode {
    let mut store = store.lock().unwrap();
    let Some(appointment) = store.appointments.get_mut(&id) else {
        return StatusCode::NOT_FOUND;
    };
    appointment["status"] = body["status"].clone();
    appointment["reason"] = body["reason"].clone();
    StatusCode::OK
}

async fn delete_appointment(State(store): State<Shared>, Path(id): Path<i32>) -> StatusCode {
    let mut store = store.lock().unwrap();
    if store.fail_delete {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    match store.appointments.remove(&id) {
        Some(_) => StatusCode::OK,
        None => StatusCode::NOT_FOUND,
    }
}

async fn cart_by_client(
    State(store): State<Shared>,
    Path(client_id): Path<i32>,
) -> Result<Json<Value>, StatusCode> {
    let store = store.lock().unwrap();
    let cart_id = store
        .carts
        .iter()
        .find(|(_, owner)| **owner == client_id)
        .map(|(id, _)| *id)
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(store.cart_json(cart_id, client_id)))
}

async fn create_cart(State(store): State<Shared>, Json(body): Json<Value>) -> StatusCode {
    let mut store = store.lock().unwrap();
    if store.fail_cart_attach {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    let client_id = body["clientId"].as_i64().unwrap_or_default() as i32;
    let appointment_id = body["appointmentId"].as_i64().unwrap_or_default() as i32;
    let cart_id = store.next_id();
    store.carts.insert(cart_id, client_id);
    store.attach(cart_id, appointment_id)
}

async fn update_cart(
    State(store): State<Shared>,
    Path(id): Path<i32>,
    Json(body): Json<Value>,
) -> StatusCode {
    let mut store = store.lock().unwrap();
    if store.fail_cart_attach {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    if !store.carts.contains_key(&id) {
        return StatusCode::NOT_FOUND;
    }
    let appointment_id = body["appointmentId"].as_i64().unwrap_or_default() as i32;
    store.attach(id, appointment_id)
}

async fn delete_cart(State(store): State<Shared>, Path(id): Path<i32>) -> StatusCode {
    let mut store = store.lock().unwrap();
    if store.carts.remove(&id).is_none() {
        return StatusCode::NOT_FOUND;
    }
    for appointment in store.appointments.values_mut() {
        if appointment["cartId"] == id {
            appointment["cartId"] = Value::Null;
        }
    }
    StatusCode::OK
}
