use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");
    
    // Create courses table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS courses (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            description TEXT NULL,
            image_url TEXT NULL,
            location VARCHAR(255) NULL,
            price DOUBLE PRECISION NOT NULL DEFAULT 0,
            max_students INTEGER NOT NULL DEFAULT 30,
            sessions_per_day INTEGER NOT NULL DEFAULT 1,
            week_days TEXT[] NOT NULL DEFAULT '{}',
            vacations TEXT[] NOT NULL DEFAULT '{}',
            start_date DATE NULL,
            end_date DATE NULL,
            session_id UUID NOT NULL,
            coach_id UUID NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create course_schedules table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS course_schedules (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            course_id UUID NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
            date DATE NOT NULL,
            start_time TIMESTAMP WITH TIME ZONE NOT NULL,
            end_time TIMESTAMP WITH TIME ZONE NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_time_range CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_courses_session_id ON courses(session_id);
        CREATE INDEX IF NOT EXISTS idx_courses_coach_id ON courses(coach_id);
        CREATE INDEX IF NOT EXISTS idx_course_schedules_course_id ON course_schedules(course_id);
        CREATE INDEX IF NOT EXISTS idx_course_schedules_date ON course_schedules(date);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
