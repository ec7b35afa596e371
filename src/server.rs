use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::allocator::{allocate, validate_request};
use crate::config::ServerConfig;
use crate::data::{
    AllocationOutput, AllocationRequest, AllocationRule, Assignment, Exam, ExamId, Hall, HallId,
    Student, StudentId,
};
use crate::eligibility::{available_halls, eligible_students};
use crate::error::AllocationError;
use crate::plan::AllocationPlan;
use crate::seat::Slot;
use crate::seat_map::{SeatMap, StudentSeatMap};

type ApiError = (StatusCode, String);
type ApiResult<T> = Result<Json<T>, ApiError>;

/// Latest plan per exam. Each allocation run replaces the previous one.
#[derive(Clone, Default)]
pub struct AppState {
    plans: Arc<RwLock<HashMap<ExamId, AllocationPlan>>>,
}

fn reject(e: AllocationError) -> ApiError {
    let status = match e {
        AllocationError::NotAllocated(_) | AllocationError::UnknownHall(_) => StatusCode::NOT_FOUND,
        AllocationError::SlotTaken { .. } => StatusCode::CONFLICT,
        _ => StatusCode::BAD_REQUEST,
    };
    (status, e.to_string())
}

fn no_plan(exam_id: ExamId) -> ApiError {
    (StatusCode::NOT_FOUND, format!("no allocation for exam {exam_id}"))
}

impl AppState {
    async fn run(&self, request: AllocationRequest) -> ApiResult<AllocationOutput> {
        validate_request(&request).map_err(reject)?;
        let output = allocate(&request);

        let plan = AllocationPlan::new(&output, request.halls, request.rules);
        self.plans.write().await.insert(output.exam_id, plan);
        Ok(Json(output))
    }
}

async fn allocate_handler(
    State(state): State<AppState>,
    Json(request): Json<AllocationRequest>,
) -> ApiResult<AllocationOutput> {
    state.run(request).await
}

/// An exam with the full student and hall lists; eligibility and hall
/// availability are applied before allocating.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamAllocationRequest {
    pub exam: Exam,
    pub students: Vec<Student>,
    pub halls: Vec<Hall>,
    #[serde(default)]
    pub rules: AllocationRule,
    #[serde(default)]
    pub seed: Option<u64>,
}

async fn allocate_exam_handler(
    State(state): State<AppState>,
    Json(input): Json<ExamAllocationRequest>,
) -> ApiResult<AllocationOutput> {
    let students = eligible_students(&input.exam, &input.students);
    let halls = available_halls(&input.halls);
    info!(
        "exam {}: {} of {} students eligible, {} of {} halls available",
        input.exam.exam_id,
        students.len(),
        input.students.len(),
        halls.len(),
        input.halls.len()
    );

    state
        .run(AllocationRequest {
            exam_id: input.exam.exam_id,
            students,
            halls,
            rules: input.rules,
            seed: input.seed,
        })
        .await
}

async fn exam_allocations_handler(
    State(state): State<AppState>,
    Path(exam_id): Path<ExamId>,
) -> ApiResult<Vec<Assignment>> {
    let plans = state.plans.read().await;
    let plan = plans.get(&exam_id).ok_or_else(|| no_plan(exam_id))?;
    Ok(Json(plan.assignments.clone()))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deleted {
    pub exam_id: ExamId,
    pub removed: usize,
}

async fn delete_allocations_handler(
    State(state): State<AppState>,
    Path(exam_id): Path<ExamId>,
) -> ApiResult<Deleted> {
    let removed = state
        .plans
        .write()
        .await
        .remove(&exam_id)
        .map_or(0, |plan| plan.assignments.len());
    Ok(Json(Deleted { exam_id, removed }))
}

async fn seat_map_handler(
    State(state): State<AppState>,
    Path((exam_id, hall_id)): Path<(ExamId, HallId)>,
) -> ApiResult<SeatMap> {
    let plans = state.plans.read().await;
    let plan = plans.get(&exam_id).ok_or_else(|| no_plan(exam_id))?;
    let hall = plan
        .hall(hall_id)
        .ok_or_else(|| reject(AllocationError::UnknownHall(hall_id)))?;
    Ok(Json(SeatMap::build(hall, &plan.assignments)))
}

async fn student_seat_map_handler(
    State(state): State<AppState>,
    Path((exam_id, student_id)): Path<(ExamId, StudentId)>,
) -> ApiResult<StudentSeatMap> {
    let plans = state.plans.read().await;
    let plan = plans.get(&exam_id).ok_or_else(|| no_plan(exam_id))?;
    StudentSeatMap::build(&plan.halls, &plan.assignments, student_id)
        .map(Json)
        .ok_or_else(|| reject(AllocationError::NotAllocated(student_id)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
    pub exam_id: ExamId,
    pub student_id_1: StudentId,
    pub student_id_2: StudentId,
}

async fn swap_handler(
    State(state): State<AppState>,
    Json(req): Json<SwapRequest>,
) -> ApiResult<Vec<Assignment>> {
    let mut plans = state.plans.write().await;
    let plan = plans.get_mut(&req.exam_id).ok_or_else(|| no_plan(req.exam_id))?;
    plan.swap_seats(req.student_id_1, req.student_id_2).map_err(reject)?;

    let swapped = [req.student_id_1, req.student_id_2]
        .iter()
        .filter_map(|id| plan.for_student(*id).cloned())
        .collect();
    Ok(Json(swapped))
}

fn first_position() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualRequest {
    pub exam_id: ExamId,
    pub student_id: StudentId,
    pub hall_id: HallId,
    pub row_number: u32,
    pub column_number: u32,
    #[serde(default = "first_position")]
    pub bench_position: u32,
}

async fn manual_handler(
    State(state): State<AppState>,
    Json(req): Json<ManualRequest>,
) -> ApiResult<Assignment> {
    let mut plans = state.plans.write().await;
    let plan = plans.get_mut(&req.exam_id).ok_or_else(|| no_plan(req.exam_id))?;
    let slot = Slot::new(req.hall_id, req.row_number, req.column_number, req.bench_position);
    let assignment = plan.assign_manually(req.student_id, slot).map_err(reject)?;
    Ok(Json(assignment.clone()))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/v1/allocations/allocate", post(allocate_handler))
        .route("/v1/exams/allocate", post(allocate_exam_handler))
        .route(
            "/v1/allocations/exam/:exam_id",
            get(exam_allocations_handler).delete(delete_allocations_handler),
        )
        .route("/v1/allocations/seatmap/:exam_id/:hall_id", get(seat_map_handler))
        .route(
            "/v1/allocations/student/seatmap/:exam_id/:student_id",
            get(student_seat_map_handler),
        )
        .route("/v1/allocations/swap", post(swap_handler))
        .route("/v1/allocations/manual", post(manual_handler))
        .with_state(state)
}

pub async fn run_server(config: &ServerConfig) -> std::io::Result<()> {
    let app = router(AppState::default());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;

    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, app).await
}
