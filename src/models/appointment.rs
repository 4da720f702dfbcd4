use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::enums::AppointmentStatus;

/// A patient-facing appointment row (`GET /appointments/me`, `POST /appointments`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: i64,
    pub doctor_id: i64,
    pub doctor_name: String,
    pub specialization: String,
    pub appointment_time: NaiveDateTime,
    pub status: AppointmentStatus,
}

/// An admin-facing appointment row (`GET /admin/appointments`, status PATCH).
///
/// The API ships a distinct shape for admins: the patient's name instead of
/// the doctor's specialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminAppointment {
    pub id: i64,
    pub doctor_name: String,
    pub patient_name: String,
    pub appointment_time: NaiveDateTime,
    pub status: AppointmentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appointment_deserializes_camel_case() {
        let json = r#"{
            "id": 7,
            "doctorId": 3,
            "doctorName": "Dr. Ada Osei",
            "specialization": "Cardiology",
            "appointmentTime": "2030-05-01T09:30:00",
            "status": "PENDING"
        }"#;
        let appt: Appointment = serde_json::from_str(json).unwrap();
        assert_eq!(appt.id, 7);
        assert_eq!(appt.doctor_id, 3);
        assert_eq!(appt.status, AppointmentStatus::Pending);
        assert_eq!(appt.appointment_time.to_string(), "2030-05-01 09:30:00");
    }

    #[test]
    fn admin_appointment_deserializes_camel_case() {
        let json = r#"{
            "id": 12,
            "doctorName": "Dr. Ada Osei",
            "patientName": "Jonas Weber",
            "appointmentTime": "2030-05-01T14:00:00",
            "status": "CONFIRMED"
        }"#;
        let appt: AdminAppointment = serde_json::from_str(json).unwrap();
        assert_eq!(appt.patient_name, "Jonas Weber");
        assert_eq!(appt.status, AppointmentStatus::Confirmed);
    }

    #[test]
    fn appointment_serializes_wire_field_names() {
        let appt = Appointment {
            id: 1,
            doctor_id: 2,
            doctor_name: "Dr. X".into(),
            specialization: "Dermatology".into(),
            appointment_time: "2030-01-01T08:00:00".parse().unwrap(),
            status: AppointmentStatus::Pending,
        };
        let json = serde_json::to_string(&appt).unwrap();
        assert!(json.contains("\"doctorName\""));
        assert!(json.contains("\"appointmentTime\""));
        assert!(json.contains("\"PENDING\""));
    }
}
