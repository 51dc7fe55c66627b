use crate::error::{ApiError, Result};
use axum::{extract::Path, response::Json};
use chrono::Utc;
use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Serialize)]
pub struct LocaleInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub native_name: &'static str,
}

const LOCALES: &[LocaleInfo] = &[
    LocaleInfo {
        code: "en",
        name: "English",
        native_name: "English",
    },
    LocaleInfo {
        code: "id",
        name: "Indonesian",
        native_name: "Bahasa Indonesia",
    },
];

static TRANSLATIONS: Lazy<Value> = Lazy::new(|| {
    json!({
        "en": {
            "common": {
                "search": "Search",
                "destinations": "Destinations",
                "plans": "Plans",
                "contact": "Contact",
                "login": "Login",
                "register": "Register",
                "profile": "Profile",
                "logout": "Logout",
                "loading": "Loading...",
                "error": "An error occurred",
                "success": "Success",
                "submit": "Submit",
                "cancel": "Cancel",
                "save": "Save",
                "delete": "Delete",
                "edit": "Edit"
            },
            "contact": {
                "form": {
                    "name": "Name",
                    "email": "Email",
                    "subject": "Subject",
                    "message": "Message",
                    "submit": "Send Message",
                    "success": "Thank you for your message. We will respond shortly.",
                    "error": "An error occurred while sending your message"
                }
            },
            "destinations": {
                "search": {
                    "placeholder": "Search for destinations...",
                    "noResults": "No destinations found",
                    "searching": "Searching...",
                    "location": "Near current location"
                },
                "details": {
                    "overview": "Overview",
                    "activities": "Activities",
                    "reviews": "Reviews",
                    "location": "Location",
                    "addToTrip": "Add to Trip",
                    "price": "Price Level",
                    "rating": "Rating",
                    "website": "Website",
                    "phone": "Phone",
                    "hours": "Opening Hours",
                    "address": "Address"
                }
            },
            "trips": {
                "create": "Create Trip",
                "edit": "Edit Trip",
                "delete": "Delete Trip",
                "title": "Trip Title",
                "description": "Description",
                "startDate": "Start Date",
                "endDate": "End Date",
                "destinations": "Destinations",
                "addDestination": "Add Destination",
                "removeDestination": "Remove Destination",
                "dayNumber": "Day",
                "duration": "Duration",
                "notes": "Notes",
                "visibility": {
                    "public": "Public",
                    "private": "Private"
                },
                "errors": {
                    "invalidDates": "End date cannot be before start date",
                    "notFound": "Trip not found",
                    "unauthorized": "You are not authorized to access this trip"
                }
            },
            "auth": {
                "login": {
                    "title": "Login",
                    "email": "Email",
                    "password": "Password",
                    "submit": "Login",
                    "forgotPassword": "Forgot Password?",
                    "noAccount": "Don't have an account?",
                    "register": "Register here"
                },
                "register": {
                    "title": "Register",
                    "name": "Full Name",
                    "email": "Email",
                    "password": "Password",
                    "confirmPassword": "Confirm Password",
                    "submit": "Register",
                    "hasAccount": "Already have an account?",
                    "login": "Login here"
                }
            }
        },
        "id": {
            "common": {
                "search": "Cari",
                "destinations": "Destinasi",
                "plans": "Rencana",
                "contact": "Kontak",
                "login": "Masuk",
                "register": "Daftar",
                "profile": "Profil",
                "logout": "Keluar",
                "loading": "Memuat...",
                "error": "Terjadi kesalahan",
                "success": "Berhasil",
                "submit": "Kirim",
                "cancel": "Batal",
                "save": "Simpan",
                "delete": "Hapus",
                "edit": "Ubah"
            },
            "contact": {
                "form": {
                    "name": "Nama",
                    "email": "Email",
                    "subject": "Subjek",
                    "message": "Pesan",
                    "submit": "Kirim Pesan",
                    "success": "Terima kasih atas pesan Anda. Kami akan segera merespons.",
                    "error": "Terjadi kesalahan saat mengirim pesan Anda"
                }
            },
            "destinations": {
                "search": {
                    "placeholder": "Cari destinasi...",
                    "noResults": "Destinasi tidak ditemukan",
                    "searching": "Mencari...",
                    "location": "Dekat lokasi saat ini"
                },
                "details": {
                    "overview": "Ikhtisar",
                    "activities": "Aktivitas",
                    "reviews": "Ulasan",
                    "location": "Lokasi",
                    "addToTrip": "Tambahkan ke Perjalanan",
                    "price": "Tingkat Harga",
                    "rating": "Penilaian",
                    "website": "Situs Web",
                    "phone": "Telepon",
                    "hours": "Jam Buka",
                    "address": "Alamat"
                }
            },
            "trips": {
                "create": "Buat Perjalanan",
                "edit": "Ubah Perjalanan",
                "delete": "Hapus Perjalanan",
                "title": "Judul Perjalanan",
                "description": "Deskripsi",
                "startDate": "Tanggal Mulai",
                "endDate": "Tanggal Selesai",
                "destinations": "Destinasi",
                "addDestination": "Tambah Destinasi",
                "removeDestination": "Hapus Destinasi",
                "dayNumber": "Hari",
                "duration": "Durasi",
                "notes": "Catatan",
                "visibility": {
                    "public": "Publik",
                    "private": "Pribadi"
                },
                "errors": {
                    "invalidDates": "Tanggal selesai tidak boleh sebelum tanggal mulai",
                    "notFound": "Perjalanan tidak ditemukan",
                    "unauthorized": "Anda tidak memiliki akses ke perjalanan ini"
                }
            },
            "auth": {
                "login": {
                    "title": "Masuk",
                    "email": "Email",
                    "password": "Kata Sandi",
                    "submit": "Masuk",
                    "forgotPassword": "Lupa Kata Sandi?",
                    "noAccount": "Belum punya akun?",
                    "register": "Daftar di sini"
                },
                "register": {
                    "title": "Daftar",
                    "name": "Nama Lengkap",
                    "email": "Email",
                    "password": "Kata Sandi",
                    "confirmPassword": "Konfirmasi Kata Sandi",
                    "submit": "Daftar",
                    "hasAccount": "Sudah punya akun?",
                    "login": "Masuk di sini"
                }
            }
        }
    })
});

pub async fn list_locales() -> Json<Vec<LocaleInfo>> {
    Json(LOCALES.to_vec())
}

pub async fn translations_for_locale(Path(locale): Path<String>) -> Result<Json<Value>> {
    let table = TRANSLATIONS
        .get(&locale)
        .ok_or_else(|| ApiError::NotFound(format!("Translations for locale '{locale}' not found")))?;

    Ok(Json(json!({
        "locale": locale,
        "translations": table,
        "timestamp": Utc::now(),
    })))
}

pub async fn all_translations() -> Json<Value> {
    Json(TRANSLATIONS.clone())
}
