//! Drawing scheduling and result declaration bodies

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sorteo_db::DbDrawing;

/// Schedule a drawing of a lottery for a date
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleDrawingRequest {
    pub lottery_id: Uuid,
    pub date: NaiveDate,
}

/// Drawing representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawingResponse {
    pub id: Uuid,
    pub lottery_id: Uuid,
    pub date: NaiveDate,
    pub is_computed: bool,
}

impl From<DbDrawing> for DrawingResponse {
    fn from(d: DbDrawing) -> Self {
        Self {
            id: d.id,
            lottery_id: d.lottery_id,
            date: d.date,
            is_computed: d.is_computed,
        }
    }
}

/// One winning number row of a Common drawing
#[derive(Debug, Clone, Deserialize)]
pub struct CommonWinningNumberDto {
    pub number: i16,
    pub prize_id: Uuid,
}

/// Declare the winning numbers of a Common drawing
#[derive(Debug, Clone, Deserialize)]
pub struct DeclareCommonRequest {
    pub numbers: Vec<CommonWinningNumberDto>,
}

/// Declare the result of a Reventado drawing
#[derive(Debug, Clone, Deserialize)]
pub struct DeclareReventadoRequest {
    pub number: i16,
    pub ball_type_id: Uuid,
}

/// Declare a three-number result (Monazo and Parley)
#[derive(Debug, Clone, Deserialize)]
pub struct DeclareTripleRequest {
    pub first: i16,
    pub second: i16,
    pub third: i16,
}

/// Generic acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn new() -> Self {
        Self { ok: true }
    }
}

impl Default for OkResponse {
    fn default() -> Self {
        Self::new()
    }
}
