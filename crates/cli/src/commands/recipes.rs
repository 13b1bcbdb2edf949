use anyhow::{Context as _, Result};

use greedible_auth::{Screen, Session};
use greedible_client::Backend;
use greedible_core::RecipeId;
use greedible_recipes::{
    DraftIngredient, Nutrition, Recipe, RecipeDraft, RecipeImage, search_by_name,
};

use crate::args::{RecipeCommands, RecipeEditArgs, RecipeFormArgs};
use crate::context::Context;
use crate::render::{or_dash, print_json, print_table};

pub async fn run(ctx: &Context, command: RecipeCommands) -> Result<()> {
    let session = ctx.session_for(Screen::Recipes).await?;
    let client = &ctx.client;

    match command {
        RecipeCommands::List { search, category } => {
            let catalog = client.recipe_catalog(&session).await?;
            let shown: Vec<_> = search_by_name(&catalog, search.as_deref().unwrap_or(""))
                .into_iter()
                .filter(|r| category.is_none() || r.category == category)
                .collect();
            if ctx.json {
                return print_json(&shown);
            }
            let rows: Vec<Vec<String>> = shown
                .iter()
                .map(|r| {
                    vec![
                        r.id.to_string(),
                        r.name.clone(),
                        or_dash(r.category.as_ref()),
                        or_dash(r.price.map(|p| p.display())),
                    ]
                })
                .collect();
            print_table(&["ID", "Name", "Category", "Price"], &rows);
        }
        RecipeCommands::Show { id } => {
            let recipe = client.recipe(&session, id).await?;
            if ctx.json {
                return print_json(&recipe);
            }
            render_recipe(ctx, &recipe);
        }
        RecipeCommands::Add(args) => {
            let draft = new_draft(args).await?;
            client.create_recipe(&session, &draft).await?;
            if ctx.json {
                return print_json(&serde_json::json!({ "created": draft.name }));
            }
            println!("Added recipe {}", draft.name.trim());
        }
        RecipeCommands::Update { id, form } => {
            let draft = edit(ctx, &session, id, form).await?;
            client.update_recipe(&session, id, &draft).await?;
            if ctx.json {
                return print_json(&serde_json::json!({ "updated": id }));
            }
            println!("Updated recipe {id}");
        }
        RecipeCommands::Delete { id } => {
            client.delete_recipe(&session, id).await?;
            if ctx.json {
                return print_json(&serde_json::json!({ "deleted": id }));
            }
            println!("Deleted recipe {id}");
        }
        RecipeCommands::Discontinue { id } => {
            client.discontinue_recipe(&session, id).await?;
            if ctx.json {
                return print_json(&serde_json::json!({ "discontinued": id }));
            }
            println!("Recipe {id} discontinued");
        }
    }
    Ok(())
}

fn render_recipe(ctx: &Context, recipe: &Recipe) {
    println!("{} (#{})", recipe.recipe_name, recipe.recipe_id);
    println!("  category: {}", recipe.category);
    println!("  price:    {}", recipe.price.display());
    if let Some(image) = &recipe.image_url {
        let url = if image.starts_with('/') {
            ctx.client.url(Backend::Staff, image)
        } else {
            image.clone()
        };
        println!("  image:    {url}");
    }
    if !recipe.description.is_empty() {
        println!("  {}", recipe.description);
    }

    let n = &recipe.nutrition;
    println!();
    print_table(
        &["Calories", "Protein", "Fat", "Carbohydrate", "Fiber"],
        &[n.values().iter().map(ToString::to_string).collect()],
    );

    println!();
    let rows: Vec<Vec<String>> = recipe
        .ingredients
        .iter()
        .map(|i| {
            vec![
                i.ingredient_id.to_string(),
                or_dash(i.ingredient_name.as_deref()),
                i.quantity().to_string(),
            ]
        })
        .collect();
    print_table(&["ID", "Ingredient", "Weight"], &rows);
}

async fn new_draft(args: RecipeFormArgs) -> Result<RecipeDraft> {
    let mut draft = RecipeDraft::new(args.name, args.category, args.price);
    draft.description = args.description;
    draft.nutrition = Nutrition {
        calories: args.nutrition.calories,
        protein: args.nutrition.protein,
        fat: args.nutrition.fat,
        carbohydrate: args.nutrition.carbohydrate,
        fiber: args.nutrition.fiber,
    };
    for (ingredient_id, weight) in args.ingredients {
        draft.add_ingredient(ingredient_id, weight);
    }

    draft.image = match (args.image, args.image_url) {
        (Some(path), _) => {
            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("failed to read image {}", path.display()))?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "image".to_string());
            RecipeImage::Upload { file_name, bytes }
        }
        (None, Some(url)) => RecipeImage::Url(url),
        (None, None) => RecipeImage::placeholder(),
    };
    Ok(draft)
}

/// Start from the stored recipe and apply only the flags that were given.
async fn edit(ctx: &Context, session: &Session, id: RecipeId, form: RecipeEditArgs) -> Result<RecipeDraft> {
    let recipe = ctx.client.recipe(session, id).await?;
    let mut draft = RecipeDraft::from_recipe(&recipe);

    if let Some(name) = form.name {
        draft.name = name;
    }
    if let Some(category) = form.category {
        draft.category = category;
    }
    if let Some(price) = form.price {
        draft.price = price;
    }
    if let Some(description) = form.description {
        draft.description = description;
    }
    let n = &mut draft.nutrition;
    for (target, value) in [
        (&mut n.calories, form.calories),
        (&mut n.protein, form.protein),
        (&mut n.fat, form.fat),
        (&mut n.carbohydrate, form.carbohydrate),
        (&mut n.fiber, form.fiber),
    ] {
        if let Some(value) = value {
            *target = value;
        }
    }
    if !form.ingredients.is_empty() {
        draft.ingredients = form
            .ingredients
            .into_iter()
            .map(|(ingredient_id, weight)| DraftIngredient {
                ingredient_id: Some(ingredient_id),
                weight: Some(weight),
            })
            .collect();
    }
    if let Some(url) = form.image_url {
        draft.image = RecipeImage::Url(url);
    }
    Ok(draft)
}
