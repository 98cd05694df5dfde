//! simpeg command-line interface.
//!
//! # Responsibility
//! - Map subcommands onto the core registry, draft and cache services.
//! - Keep user-facing messages in the registry's Indonesian wording.
//! - Surface every failure as a message and a non-zero exit, never a panic.

#![forbid(unsafe_code)]

mod config;
mod location;
mod output;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use log::error;
use simpeg_core::cache::{
    AssetCache, AssetOrigin, DirOrigin, FetchSource, OriginError, APP_SHELL, CACHE_NAME,
};
use simpeg_core::db::open_db;
use simpeg_core::export::{export_to_path, DEFAULT_EXPORT_FILE};
use simpeg_core::geo::{apply_to_form, GeoError, LocationProvider};
use simpeg_core::{
    default_log_level, init_logging, EmployeeForm, EmployeeId, EmployeeListQuery, EmployeeService,
    EmployeeServiceError, FileDraftStore, SqliteEmployeeRepository,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use config::{Config, Theme};
use location::EnvLocationProvider;

const DB_FILE: &str = "simpeg.db";
const DRAFT_FILE: &str = "draft.json";
const LOGS_DIR: &str = "logs";

#[derive(Parser)]
#[command(name = "simpeg")]
#[command(about = "Sistem Informasi Manajemen Pegawai", version)]
struct Cli {
    /// Direktori data (database, draf, log)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Tambah karyawan baru
    Add(AddArgs),
    /// Perbarui data karyawan yang sudah ada
    Edit {
        id: EmployeeId,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Tampilkan daftar karyawan, terbaru lebih dulu
    List {
        /// Cari berdasarkan nama atau NIK
        #[arg(long)]
        search: Option<String>,
        /// Batas jumlah kartu yang ditampilkan
        #[arg(long)]
        limit: Option<u32>,
        /// Lewati sejumlah kartu dari atas daftar
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
    /// Tampilkan satu karyawan
    Show { id: EmployeeId },
    /// Hapus data karyawan
    Delete {
        id: EmployeeId,
        /// Konfirmasi penghapusan
        #[arg(long)]
        yes: bool,
    },
    /// Statistik registri karyawan
    Stats,
    /// Ekspor seluruh data ke berkas JSON
    Export {
        /// Berkas tujuan
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Draf formulir yang tersimpan otomatis
    Draft {
        #[command(subcommand)]
        command: DraftCommand,
    },
    /// Cache app shell untuk mode offline
    Cache {
        #[command(subcommand)]
        command: CacheCommand,
    },
    /// Tampilkan atau ubah tema
    Theme {
        #[arg(value_enum)]
        theme: Option<Theme>,
    },
    /// Versi aplikasi
    Version,
}

#[derive(Args)]
struct AddArgs {
    #[command(flatten)]
    fields: FieldArgs,

    /// Isi koordinat dari sumber lokasi otomatis
    #[arg(long)]
    auto_location: bool,

    /// Mulai dari draf yang tersimpan
    #[arg(long)]
    from_draft: bool,
}

#[derive(Args)]
struct FieldArgs {
    /// NIK, 16 digit angka
    #[arg(long)]
    nik: Option<String>,
    /// Nama lengkap
    #[arg(long)]
    nama: Option<String>,
    /// Nomor telepon
    #[arg(long)]
    telepon: Option<String>,
    #[arg(long)]
    latitude: Option<String>,
    #[arg(long)]
    longitude: Option<String>,
    /// "Menikah" atau "Belum Menikah"
    #[arg(long)]
    status_keluarga: Option<String>,
    /// SD, SMP, SMA/SMK, Diploma, S1, S2, S3 atau Lainnya
    #[arg(long)]
    pendidikan: Option<String>,
    /// Pendidikan bebas saat memilih Lainnya
    #[arg(long)]
    pendidikan_lainnya: Option<String>,
}

impl FieldArgs {
    fn apply_to(&self, form: &mut EmployeeForm) {
        if let Some(nik) = &self.nik {
            form.nik = nik.clone();
        }
        if let Some(nama) = &self.nama {
            form.nama = nama.clone();
        }
        if let Some(telepon) = &self.telepon {
            form.telepon = telepon.clone();
        }
        if let Some(latitude) = &self.latitude {
            form.latitude = latitude.clone();
        }
        if let Some(longitude) = &self.longitude {
            form.longitude = longitude.clone();
        }
        if let Some(status_keluarga) = &self.status_keluarga {
            form.status_keluarga = status_keluarga.clone();
        }
        if let Some(pendidikan) = &self.pendidikan {
            form.pendidikan = pendidikan.clone();
        }
        if let Some(pendidikan_lainnya) = &self.pendidikan_lainnya {
            form.pendidikan_lainnya = pendidikan_lainnya.clone();
        }
    }
}

#[derive(Subcommand)]
enum DraftCommand {
    /// Tampilkan draf tersimpan
    Show,
    /// Hapus draf tersimpan
    Clear,
}

#[derive(Subcommand)]
enum CacheCommand {
    /// Pasang app shell ke dalam cache
    Install {
        /// Direktori asal aset
        #[arg(long, value_name = "DIR")]
        origin: PathBuf,
    },
    /// Aktifkan generasi cache ini dan buang generasi lama
    Activate,
    /// Ambil satu aset, cache lebih dulu
    Get {
        path: String,
        /// Direktori asal aset; tanpa ini origin dianggap tidak terjangkau
        #[arg(long, value_name = "DIR")]
        origin: Option<PathBuf>,
        /// Tulis isi aset ke berkas
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Tampilkan isi cache aktif
    Status,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Command::Version = cli.command {
        println!(
            "simpeg {} (core {})",
            env!("CARGO_PKG_VERSION"),
            simpeg_core::core_version()
        );
        return Ok(());
    }

    let mut config = Config::load()?;
    if let Command::Theme { theme } = cli.command {
        return cmd_theme(&mut config, theme);
    }

    let data_dir = config.data_dir(cli.data_dir.as_deref())?;
    fs::create_dir_all(&data_dir)?;
    let logs_dir = data_dir.join(LOGS_DIR);
    if let Err(err) = init_logging(default_log_level(), &logs_dir.to_string_lossy()) {
        eprintln!("Peringatan: log tidak aktif: {err}");
    }

    match cli.command {
        Command::Add(args) => cmd_add(&data_dir, &args),
        Command::Edit { id, fields } => cmd_edit(&data_dir, id, &fields),
        Command::List {
            search,
            limit,
            offset,
        } => cmd_list(&data_dir, search, limit, offset),
        Command::Show { id } => cmd_show(&data_dir, id),
        Command::Delete { id, yes } => cmd_delete(&data_dir, id, yes),
        Command::Stats => cmd_stats(&data_dir),
        Command::Export { output } => cmd_export(&data_dir, output),
        Command::Draft { command } => cmd_draft(&data_dir, &command),
        Command::Cache { command } => cmd_cache(&config, command),
        Command::Theme { .. } | Command::Version => Ok(()),
    }
}

fn draft_store(data_dir: &Path) -> FileDraftStore {
    FileDraftStore::new(data_dir.join(DRAFT_FILE))
}

fn cmd_add(data_dir: &Path, args: &AddArgs) -> Result<()> {
    let draft = draft_store(data_dir);
    let mut form = if args.from_draft {
        draft.load()?.unwrap_or_default()
    } else {
        EmployeeForm::default()
    };
    args.fields.apply_to(&mut form);

    if args.auto_location {
        match EnvLocationProvider.current_location() {
            Ok(coordinates) => {
                apply_to_form(&mut form, coordinates);
                println!("Lokasi berhasil didapatkan!");
            }
            Err(GeoError::Unsupported) => {
                eprintln!("Geolocation tidak didukung oleh browser Anda.");
            }
            Err(GeoError::Unavailable(reason)) => {
                error!("event=geo_lookup module=cli status=error error={reason}");
                eprintln!("Gagal mendapatkan lokasi. Silakan masukkan secara manual.");
            }
        }
    }

    let conn = open_db(data_dir.join(DB_FILE))?;
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn)?);
    match service.submit(&form) {
        Ok(employee) => {
            println!("Data karyawan berhasil disimpan!");
            println!("{}", output::render_card(&employee));
            if let Err(err) = draft.clear() {
                error!("event=draft_clear module=cli status=error error={err}");
            }
            Ok(())
        }
        Err(EmployeeServiceError::Form(errors)) => {
            for field_error in &errors {
                eprintln!("{}: {}", field_error.field.label(), field_error.message);
            }
            if let Err(err) = draft.save(&form) {
                error!("event=draft_save module=cli status=error error={err}");
            }
            bail!("Harap perbaiki kesalahan pada formulir sebelum menyimpan.");
        }
        Err(EmployeeServiceError::NikTaken(nik)) => {
            eprintln!("NIK sudah terdaftar: {nik}");
            bail!("Gagal menyimpan data karyawan. Silakan coba lagi.");
        }
        Err(err) => {
            error!("event=employee_save module=cli status=error error={err}");
            bail!("Gagal menyimpan data karyawan. Silakan coba lagi.");
        }
    }
}

fn cmd_edit(data_dir: &Path, id: EmployeeId, fields: &FieldArgs) -> Result<()> {
    let conn = open_db(data_dir.join(DB_FILE))?;
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn)?);

    let existing = match service.get(id) {
        Ok(Some(employee)) => employee,
        Ok(None) => bail!("Data karyawan tidak ditemukan."),
        Err(err) => {
            error!("event=employee_load module=cli status=error id={id} error={err}");
            bail!("Gagal memuat data karyawan untuk diedit.");
        }
    };

    let mut form = EmployeeForm::from_employee(&existing);
    fields.apply_to(&mut form);

    match service.submit_update(id, &form) {
        Ok(employee) => {
            println!("Data karyawan berhasil diperbarui!");
            println!("{}", output::render_card(&employee));
            if let Err(err) = draft_store(data_dir).clear() {
                error!("event=draft_clear module=cli status=error error={err}");
            }
            Ok(())
        }
        Err(EmployeeServiceError::Form(errors)) => {
            for field_error in &errors {
                eprintln!("{}: {}", field_error.field.label(), field_error.message);
            }
            bail!("Harap perbaiki kesalahan pada formulir sebelum menyimpan.");
        }
        Err(EmployeeServiceError::NikTaken(nik)) => {
            eprintln!("NIK sudah terdaftar: {nik}");
            bail!("Gagal menyimpan data karyawan. Silakan coba lagi.");
        }
        Err(EmployeeServiceError::EmployeeNotFound(_)) => {
            bail!("Data karyawan tidak ditemukan.");
        }
        Err(err) => {
            error!("event=employee_save module=cli status=error error={err}");
            bail!("Gagal menyimpan data karyawan. Silakan coba lagi.");
        }
    }
}

fn cmd_list(data_dir: &Path, search: Option<String>, limit: Option<u32>, offset: u32) -> Result<()> {
    let conn = open_db(data_dir.join(DB_FILE))?;
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn)?);

    let query = EmployeeListQuery {
        search,
        limit,
        offset,
    };
    match service.list(&query) {
        Ok(employees) if employees.is_empty() => {
            println!(
                "{}",
                if query.search.is_some() {
                    "Tidak ada karyawan yang cocok dengan pencarian"
                } else {
                    "Belum ada data karyawan"
                }
            );
            Ok(())
        }
        Ok(employees) => {
            println!("{}", output::render_list(&employees));
            Ok(())
        }
        Err(err) => {
            error!("event=employee_list module=cli status=error error={err}");
            bail!("Gagal memuat data karyawan.");
        }
    }
}

fn cmd_show(data_dir: &Path, id: EmployeeId) -> Result<()> {
    let conn = open_db(data_dir.join(DB_FILE))?;
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn)?);

    match service.get(id) {
        Ok(Some(employee)) => {
            println!("{}", output::render_card(&employee));
            Ok(())
        }
        Ok(None) => bail!("Data karyawan tidak ditemukan."),
        Err(err) => {
            error!("event=employee_load module=cli status=error id={id} error={err}");
            bail!("Gagal memuat data karyawan.");
        }
    }
}

fn cmd_delete(data_dir: &Path, id: EmployeeId, yes: bool) -> Result<()> {
    if !yes {
        eprintln!("Apakah Anda yakin ingin menghapus data karyawan ini?");
        bail!("Jalankan ulang dengan --yes untuk menghapus.");
    }

    let conn = open_db(data_dir.join(DB_FILE))?;
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn)?);
    match service.delete(id) {
        Ok(employee) => {
            println!("Data karyawan berhasil dihapus!");
            println!("{}", output::render_card(&employee));
            Ok(())
        }
        Err(EmployeeServiceError::EmployeeNotFound(_)) => {
            bail!("Data karyawan tidak ditemukan.");
        }
        Err(err) => {
            error!("event=employee_delete module=cli status=error id={id} error={err}");
            bail!("Gagal menghapus data karyawan.");
        }
    }
}

fn cmd_stats(data_dir: &Path) -> Result<()> {
    let conn = open_db(data_dir.join(DB_FILE))?;
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn)?);

    match service.statistics() {
        Ok(stats) => {
            println!("{}", output::render_stats(&stats));
            Ok(())
        }
        Err(err) => {
            error!("event=statistics module=cli status=error error={err}");
            bail!("Gagal memuat data karyawan.");
        }
    }
}

fn cmd_export(data_dir: &Path, output: Option<PathBuf>) -> Result<()> {
    let conn = open_db(data_dir.join(DB_FILE))?;
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn)?);
    let path = output.unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE));

    let employees = match service.list(&EmployeeListQuery::default()) {
        Ok(employees) => employees,
        Err(err) => {
            error!("event=export module=cli status=error error={err}");
            bail!("Gagal mengekspor data.");
        }
    };
    match export_to_path(&employees, &path) {
        Ok(count) => {
            println!("Data berhasil diekspor!");
            println!("{} karyawan -> {}", count, path.display());
            Ok(())
        }
        Err(err) => {
            error!("event=export module=cli status=error error={err}");
            bail!("Gagal mengekspor data.");
        }
    }
}

fn cmd_draft(data_dir: &Path, command: &DraftCommand) -> Result<()> {
    let draft = draft_store(data_dir);
    match command {
        DraftCommand::Show => match draft.load() {
            Ok(Some(form)) => {
                println!("{}", output::render_form(&form));
                Ok(())
            }
            Ok(None) => {
                println!("Tidak ada draf tersimpan.");
                Ok(())
            }
            Err(err) => {
                error!("event=draft_load module=cli status=error error={err}");
                bail!("Gagal memuat draf.");
            }
        },
        DraftCommand::Clear => match draft.clear() {
            Ok(()) => {
                println!("Draf dihapus.");
                Ok(())
            }
            Err(err) => {
                error!("event=draft_clear module=cli status=error error={err}");
                bail!("Gagal menghapus draf.");
            }
        },
    }
}

fn cmd_cache(config: &Config, command: CacheCommand) -> Result<()> {
    let cache = AssetCache::new(config.cache_dir()?, CACHE_NAME);
    match command {
        CacheCommand::Install { origin } => {
            let origin = DirOrigin::new(origin);
            let count = cache.install(&origin, &APP_SHELL)?;
            println!("Cache {}: {} aset tersimpan.", cache.name(), count);
            Ok(())
        }
        CacheCommand::Activate => {
            let evicted = cache.activate()?;
            println!("Cache aktif: {}.", cache.name());
            for name in evicted {
                println!("Cache lama dihapus: {name}");
            }
            Ok(())
        }
        CacheCommand::Get {
            path,
            origin,
            output,
        } => {
            let outcome = match origin {
                Some(dir) => cache.fetch(&DirOrigin::new(dir), &path)?,
                None => cache.fetch(&UnreachableOrigin, &path)?,
            };
            let source = match outcome.source {
                FetchSource::Cache => "cache",
                FetchSource::Origin => "origin",
                FetchSource::Fallback => "fallback",
            };
            println!("{path}: {} byte ({source})", outcome.body.len());
            if let Some(file) = output {
                fs::write(&file, &outcome.body)?;
                println!("Tersimpan ke {}", file.display());
            }
            Ok(())
        }
        CacheCommand::Status => {
            let entries = cache.entries()?;
            println!("Cache {}: {} entri.", cache.name(), entries.len());
            for meta in entries {
                println!("{}  {}", meta.path, meta.cached_at.to_rfc3339());
            }
            Ok(())
        }
    }
}

fn cmd_theme(config: &mut Config, theme: Option<Theme>) -> Result<()> {
    match theme {
        Some(theme) => {
            config.theme = theme;
            config.save()?;
            println!("Tema disimpan: {theme}");
        }
        None => println!("Tema: {}", config.theme),
    }
    Ok(())
}

/// Origin used when no asset directory is given. Every fetch reports the
/// origin as unreachable, so cached entries and the document fallback
/// still serve.
struct UnreachableOrigin;

impl AssetOrigin for UnreachableOrigin {
    fn fetch(&self, _path: &str) -> Result<Vec<u8>, OriginError> {
        Err(OriginError::Unavailable("no origin configured".to_string()))
    }
}
