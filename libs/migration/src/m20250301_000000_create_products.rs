use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(ProductStatus::Enum)
                    .values([ProductStatus::Active, ProductStatus::Inactive])
                    .to_owned(),
            )
            .await?;

        // name uniqueness surfaces as tbl_product_name_key
        manager
            .create_table(
                Table::create()
                    .table(TblProduct::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TblProduct::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TblProduct::Name)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(TblProduct::Description).string_len(500).null())
                    .col(ColumnDef::new(TblProduct::Price).decimal_len(12, 2).not_null())
                    .col(integer(TblProduct::Quantity))
                    .col(ColumnDef::new(TblProduct::Category).string_len(100).not_null())
                    .col(ColumnDef::new(TblProduct::ImageUrl).string_len(255).not_null())
                    .col(ColumnDef::new(TblProduct::Brand).string_len(100).null())
                    .col(
                        ColumnDef::new(TblProduct::Status)
                            .enumeration(
                                ProductStatus::Enum,
                                [ProductStatus::Active, ProductStatus::Inactive],
                            )
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        timestamp_with_time_zone(TblProduct::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(TblProduct::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Named so storage errors can be translated by constraint name
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                ALTER TABLE tbl_product
                    ADD CONSTRAINT tbl_product_price_check CHECK (price >= 0.01),
                    ADD CONSTRAINT tbl_product_quantity_check CHECK (quantity > 0),
                    ADD CONSTRAINT tbl_product_timestamps_check CHECK (created_at <= updated_at)
                "#,
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tbl_product_category")
                    .table(TblProduct::Table)
                    .col(TblProduct::Category)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TblProduct::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_type(Type::drop().if_exists().name(ProductStatus::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum TblProduct {
    #[sea_orm(iden = "tbl_product")]
    Table,
    Id,
    Name,
    Description,
    Price,
    Quantity,
    Category,
    ImageUrl,
    Brand,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ProductStatus {
    #[sea_orm(iden = "product_status")]
    Enum,
    Active,
    Inactive,
}
