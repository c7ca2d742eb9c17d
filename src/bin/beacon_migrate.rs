use beacon_infra::run_migration;

#[actix_web::main]
async fn main() {
    println!("Starting database migration");
    run_migration().await.expect("Migration to succeed");
    println!("Database migration finished");
}
